/// Script searcher with fuzzy matching
///
/// Backs the quick pick: find a script without typing its exact name.

use crate::scripts::ScriptRecord;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Most candidates a quick pick offers
const PICK_LIMIT: usize = 10;

/// A script and how well it matched
#[derive(Debug, Clone)]
pub struct ScriptMatch<'a> {
    pub script: &'a ScriptRecord,
    pub score: i64,
    /// The query matched the name, not just the command text
    pub by_name: bool,
}

/// What a quick-pick query resolved to
#[derive(Debug)]
pub enum Pick<'a> {
    /// Exact name, or the only candidate and it matched by name
    Script(&'a ScriptRecord),
    /// Candidates the user has to choose from
    Choices(Vec<ScriptMatch<'a>>),
    NoMatch,
}

/// Handles script searching with fuzzy matching
pub struct Searcher {
    matcher: SkimMatcherV2,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Rank scripts against `query`, best first
    ///
    /// Name and command are both matched; the better score wins.
    pub fn search<'a>(
        &self,
        scripts: &'a [ScriptRecord],
        query: &str,
        limit: usize,
    ) -> Vec<ScriptMatch<'a>> {
        let mut results: Vec<ScriptMatch<'a>> = scripts
            .iter()
            .filter_map(|script| {
                let by_name = self.matcher.fuzzy_match(&script.name, query);
                let by_command = self.matcher.fuzzy_match(&script.command, query);
                by_name.max(by_command).map(|score| ScriptMatch {
                    script,
                    score,
                    by_name: by_name.is_some(),
                })
            })
            .collect();

        // Stable sort keeps discovery order between equal scores
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(limit);

        results
    }

    /// Resolve a quick-pick query
    ///
    /// Only an exact name, or a single fuzzy match on the name, resolves to
    /// a script. Anything looser is handed back for the user to choose.
    pub fn pick<'a>(&self, scripts: &'a [ScriptRecord], query: &str) -> Pick<'a> {
        if let Some(script) = scripts.iter().find(|s| s.name == query) {
            return Pick::Script(script);
        }

        let matches = self.search(scripts, query, PICK_LIMIT);
        if matches.len() == 1 && matches[0].by_name {
            return Pick::Script(matches[0].script);
        }

        if matches.is_empty() {
            Pick::NoMatch
        } else {
            Pick::Choices(matches)
        }
    }
}
