//! deckgen CLI - build slide decks from templates

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use deckgen::config::{DEFAULT_BRAND_PATH, DEFAULT_TEMPLATES_PATH};
use deckgen::{
    Config, ContentMap, DeckBuilder, LegacyTemplate, PlaceholderKind, TemplateRef, Warning,
};

#[derive(Parser)]
#[command(name = "deckgen")]
#[command(version)]
#[command(about = "Generate PowerPoint decks from templates", long_about = None)]
struct Cli {
    /// Template catalog
    #[arg(long, value_name = "FILE", default_value = DEFAULT_TEMPLATES_PATH, global = true)]
    templates: PathBuf,

    /// Brand profile (defaults apply when missing)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_BRAND_PATH, global = true)]
    brand: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    List,

    /// Show the placeholders of a template
    Show {
        /// Template name
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Build a one-slide deck from a template and a JSON content file
    Build {
        /// Template name from the catalog
        #[arg(value_name = "TEMPLATE", required_unless_present = "legacy")]
        template: Option<String>,

        /// Legacy JSON template with a "placeholders" list
        #[arg(long, value_name = "FILE", conflicts_with = "template")]
        legacy: Option<PathBuf>,

        /// JSON object mapping placeholder names to content
        #[arg(short, long, value_name = "FILE")]
        content: Option<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "output.pptx")]
        output: PathBuf,
    },

    /// Pick a template and enter content at prompts
    Interactive {
        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "output.pptx")]
        output: PathBuf,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::new(cli.templates, cli.brand);

    let result = match cli.command.unwrap_or(Commands::Interactive {
        output: PathBuf::from("output.pptx"),
    }) {
        Commands::List => cmd_list(&config),
        Commands::Show { template } => cmd_show(&config, &template),
        Commands::Build {
            template,
            legacy,
            content,
            output,
        } => cmd_build(
            &config,
            template,
            legacy.as_deref(),
            content.as_deref(),
            &output,
        ),
        Commands::Interactive { output } => cmd_interactive(&config, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_list(config: &Config) -> CliResult {
    let builder = DeckBuilder::from_config(config)?;
    for name in builder.catalog().template_names() {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_show(config: &Config, template: &str) -> CliResult {
    let builder = DeckBuilder::from_config(config)?;
    let Some(template) = builder.catalog().template(template) else {
        return Err(deckgen::Error::InvalidTemplateReference(template.to_string()).into());
    };

    println!("{}", template.name());
    for spec in template.placeholders() {
        println!(
            "  {:<16} {:<6} x={:<5} y={:<5} w={:<5} h={}",
            spec.name,
            spec.kind.as_str(),
            spec.x,
            spec.y,
            spec.w,
            spec.h
        );
    }
    Ok(())
}

fn cmd_build(
    config: &Config,
    template: Option<String>,
    legacy: Option<&Path>,
    content: Option<&Path>,
    output: &Path,
) -> CliResult {
    let builder = DeckBuilder::from_config(config)?;

    let template = match (template, legacy) {
        (_, Some(path)) => {
            let json = std::fs::read_to_string(path)?;
            TemplateRef::Legacy(LegacyTemplate::from_json_str(&json)?)
        },
        (Some(name), None) => TemplateRef::Named(name),
        (None, None) => return Err("a template name or --legacy file is required".into()),
    };
    let content = match content {
        Some(path) => ContentMap::load(path)?,
        None => ContentMap::new(),
    };

    let warnings = builder.create_deck(output, &template, &content)?;
    report(&warnings);
    println!("Presentation saved as {}", output.display());
    Ok(())
}

fn cmd_interactive(config: &Config, output: &Path) -> CliResult {
    let builder = DeckBuilder::from_config(config)?;
    let catalog = builder.catalog();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Available templates:");
    for name in catalog.template_names() {
        println!(" - {}", name);
    }

    let name = prompt(&mut input, "\nEnter template name: ")?.trim().to_string();
    if !catalog.contains(&name) {
        println!("Invalid template name.");
        return Ok(());
    }

    println!("\nProvide content for placeholders:");
    let mut content = ContentMap::new();
    for spec in catalog.placeholders(&name) {
        let label = match spec.kind {
            PlaceholderKind::Text(_) => format!("Text for {}: ", spec.name),
            PlaceholderKind::Image(_) => format!("Image path for {} (png/jpg): ", spec.name),
            PlaceholderKind::Table(_) => {
                format!("Table for {} (CSV path or JSON rows): ", spec.name)
            },
        };
        let value = prompt(&mut input, &label)?;
        content.insert(spec.name.clone(), value);
    }

    let warnings = builder.create_deck(output, &TemplateRef::Named(name), &content)?;
    report(&warnings);
    println!("Presentation saved as {}", output.display());
    Ok(())
}

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn report(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}
