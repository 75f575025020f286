// scripts-runner - every project's handy commands, in one place
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use clap::{Parser, Subcommand};
use scripts_runner_lib::{
    core::{Pick, ScriptsManager},
    host::{
        reload_channel, render, resolve_roots, OsFileSystem, ReloadRequest, ScriptsWatcher,
        TerminalExecutor,
    },
    Result, ScriptRecord, ScriptsError, Settings,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "scripts-runner",
    version,
    about = "Run and manage the scripts declared in your projects' .scriptsrc files"
)]
struct Cli {
    /// Workspace folder (repeatable, defaults to the current directory)
    #[arg(short, long = "root", global = true)]
    roots: Vec<PathBuf>,

    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List scripts grouped by category
    List,
    /// Show the project / category / script tree
    Tree,
    /// Add a script to the scripts file
    Add {
        name: String,
        command: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Change an existing script. Fields left out keep their value.
    Edit {
        name: String,
        #[arg(long = "name")]
        new_name: Option<String>,
        #[arg(long = "command")]
        new_command: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a script
    Delete {
        name: String,
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Run a script by name, fuzzy match, or pick from a list
    Run { query: Option<String> },
    /// Fuzzy search scripts
    Find {
        query: String,
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Create an example scripts file in the first workspace folder
    Init,
    /// Print the path of the scripts file that edits are written to
    Path,
    /// Show what discovery found
    Status,
    /// Re-render the tree whenever a scripts file changes
    Watch,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        error!("command failed: {:?}", e);
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    let roots = resolve_roots(&cli.roots)?;
    let mut manager = ScriptsManager::new(OsFileSystem, roots, settings.discovery.clone());

    match cli.command {
        Commands::List => handle_list(&manager),
        Commands::Tree => handle_tree(&manager),
        Commands::Add {
            name,
            command,
            description,
            category,
        } => handle_add(&mut manager, name, command, description, category),
        Commands::Edit {
            name,
            new_name,
            new_command,
            description,
            category,
        } => handle_edit(&mut manager, &name, new_name, new_command, description, category),
        Commands::Delete { name, yes } => handle_delete(&mut manager, &name, yes),
        Commands::Run { query } => handle_run(&manager, &settings, query.as_deref()),
        Commands::Find { query, limit } => handle_find(&manager, &query, limit),
        Commands::Init => handle_init(&mut manager),
        Commands::Path => handle_path(&manager),
        Commands::Status => handle_status(&manager),
        Commands::Watch => handle_watch(&mut manager, &settings).await,
    }
}

fn handle_list(manager: &ScriptsManager) -> Result<()> {
    let registry = manager.registry();

    if registry.is_empty() {
        println!("No scripts found.");
        return Ok(());
    }

    for (category, scripts) in registry.scripts_by_category() {
        println!("\n{}:", category);
        for script in scripts {
            let project = script
                .project_name
                .as_deref()
                .map(|p| format!(" [{}]", p))
                .unwrap_or_default();
            println!("  {:<20} {}{}", script.name, script.command, project);
            if let Some(description) = &script.description {
                println!("  {:<20} {}", "", description);
            }
        }
    }

    Ok(())
}

fn handle_tree(manager: &ScriptsManager) -> Result<()> {
    let lines = render::render_tree(manager.scripts());

    if lines.is_empty() {
        println!("No scripts found.");
    } else {
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}

fn handle_add(
    manager: &mut ScriptsManager,
    name: String,
    command: String,
    description: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let mut script = ScriptRecord::new(name.clone(), command);
    script.description = description.filter(|d| !d.is_empty());
    script.category = category.filter(|c| !c.is_empty());

    manager.add(script)?;
    println!("✓ Script \"{}\" added.", name);
    Ok(())
}

fn handle_edit(
    manager: &mut ScriptsManager,
    name: &str,
    new_name: Option<String>,
    new_command: Option<String>,
    description: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let existing = manager
        .registry()
        .get(name)
        .cloned()
        .ok_or_else(|| ScriptsError::NotFound(name.to_string()))?;

    let updated = ScriptRecord {
        name: new_name.unwrap_or(existing.name),
        command: new_command.unwrap_or(existing.command),
        // An empty value clears the field
        description: description.map_or(existing.description, |d| (!d.is_empty()).then_some(d)),
        category: category.map_or(existing.category, |c| (!c.is_empty()).then_some(c)),
        extra: existing.extra,
        project_path: None,
        project_name: None,
    };
    let updated_name = updated.name.clone();

    manager.update(name, updated)?;
    println!("✓ Script \"{}\" updated.", updated_name);
    Ok(())
}

fn handle_delete(manager: &mut ScriptsManager, name: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete script \"{}\"?", name))? {
        println!("Cancelled.");
        return Ok(());
    }

    manager.delete(name)?;
    println!("✓ Script \"{}\" deleted.", name);
    Ok(())
}

fn handle_run(manager: &ScriptsManager, settings: &Settings, query: Option<&str>) -> Result<()> {
    let scripts = manager.scripts();
    if scripts.is_empty() {
        println!("No scripts available.");
        return Ok(());
    }

    let chosen = match query {
        Some(query) => match manager.pick(query) {
            Pick::Script(script) => script,
            Pick::Choices(matches) => {
                println!("No script is named '{}'.", query);
                let candidates: Vec<&ScriptRecord> = matches.iter().map(|m| m.script).collect();

                let choice = match candidates.as_slice() {
                    [only] => confirm(&format!("Run \"{}\" ({})?", only.name, only.command))?
                        .then_some(*only),
                    _ => choose_from_list(&candidates)?,
                };
                match choice {
                    Some(script) => script,
                    None => {
                        println!("Cancelled.");
                        return Ok(());
                    }
                }
            }
            Pick::NoMatch => return Err(ScriptsError::NotFound(query.to_string())),
        },
        None => {
            let all: Vec<&ScriptRecord> = scripts.iter().collect();
            match choose_from_list(&all)? {
                Some(script) => script,
                None => return Ok(()),
            }
        }
    };

    let executor = TerminalExecutor::from_settings(settings.run.shell.as_deref());
    manager.run(&executor, &chosen.name)
}

fn handle_find(manager: &ScriptsManager, query: &str, limit: usize) -> Result<()> {
    let results = manager.find(query, limit);

    if results.is_empty() {
        println!("No scripts found matching '{}'", query);
    } else {
        println!("\nFound {} script(s) matching '{}':", results.len(), query);
        println!("{}", "=".repeat(60));
        for (i, m) in results.iter().enumerate() {
            println!("{:3}. {:<20} {}", i + 1, m.script.name, m.script.command);
        }
        println!("{}", "=".repeat(60));
    }

    Ok(())
}

fn handle_init(manager: &mut ScriptsManager) -> Result<()> {
    let path = manager.create_default_file()?;
    println!("✓ Created {}", path.display());
    Ok(())
}

fn handle_path(manager: &ScriptsManager) -> Result<()> {
    match manager.primary_file() {
        Some(path) => println!("{}", path.display()),
        None => println!("No scripts file found."),
    }
    Ok(())
}

fn handle_status(manager: &ScriptsManager) -> Result<()> {
    let registry = manager.registry();

    println!("\nscripts-runner Status");
    println!("{}", "=".repeat(60));

    println!("\nWorkspace:");
    for root in manager.roots() {
        println!("  {:<16} {}", root.name, root.path.display());
    }

    println!("\nDiscovery:");
    println!("  Mode:        {}", registry.mode());
    println!("  Scripts:     {}", registry.len());
    if registry.unrecognized_count() > 0 {
        println!("  Skipped:     {} entries (kept in their files)", registry.unrecognized_count());
    }
    println!(
        "  Loaded at:   {}",
        registry.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    match registry.primary_file() {
        Some(path) => println!("  Primary:     {}", path.display()),
        None => println!("  Primary:     (none)"),
    }

    if !registry.sources().is_empty() {
        println!("\nSources:");
        for (project, path) in registry.sources() {
            println!("  {:<16} {}", project, path.display());
        }
    }

    println!("{}", "=".repeat(60));
    Ok(())
}

async fn handle_watch(manager: &mut ScriptsManager, settings: &Settings) -> Result<()> {
    let (signal, mut queue) = reload_channel();
    let _watcher = ScriptsWatcher::start(
        manager.roots(),
        &manager.settings().file_name,
        signal.clone(),
    )?;
    let debounce = Duration::from_millis(settings.watch.debounce_ms);

    // First render goes through the queue like every other reload
    signal.request(ReloadRequest::Manual);

    loop {
        tokio::select! {
            batch = queue.next_batch(debounce) => {
                if batch.is_none() {
                    return Ok(());
                }
                manager.reload();
                print!("\x1B[2J\x1B[H");
                println!("Watching for changes. Ctrl-C to stop.\n");
                handle_tree(manager)?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                return Ok(());
            }
        }
    }
}

/// Numbered list on stdout, choice read from stdin
fn choose_from_list<'a>(scripts: &[&'a ScriptRecord]) -> Result<Option<&'a ScriptRecord>> {
    for (i, script) in scripts.iter().enumerate() {
        println!("{:3}. {:<20} {}", i + 1, script.name, script.command);
    }

    let answer = prompt("Select a script to run: ")?;
    let choice = answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| scripts.get(i).copied());

    Ok(choice)
}

fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().map_err(|e| ScriptsError::io("<stdout>", e))?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)
        .map_err(|e| ScriptsError::io("<stdin>", e))?;
    Ok(line.trim().to_string())
}
