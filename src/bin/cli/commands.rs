//! Command Execution Logic
//!
//! Runs the analysis and configuration subcommands and loads configuration
//! files for them.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};
use tracing::{debug, info};

use docoracle_rs::{DocOracleConfig, FreeTextTranslator, TypeCatalog};

use crate::cli::args::{AnalyzeArgs, InitConfigArgs, TranslateArgs, ValidateConfigArgs};
use crate::cli::output::{render_matches, render_report, write_output};

/// Analyze every commented member of a catalog and emit the report
pub fn analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config.as_deref())?;
    if let Some(command) = args.validator_cmd {
        config.validation.command = Some(command);
    }
    if args.sequential {
        config.performance.parallel = false;
    }

    let catalog = Arc::new(load_catalog(&args.catalog)?);
    let translator = FreeTextTranslator::new(config, catalog.clone())?;

    let report = translator.analyze_catalog(&catalog);
    info!(
        "Resolved {} of {} detected equivalences",
        report.summary.resolved, report.summary.detected
    );

    let rendered = render_report(&report, args.format, args.out.is_none())?;
    write_output(&rendered, args.out.as_deref())?;

    if let Some(out) = &args.out {
        eprintln!(
            "{} {}",
            "✅ Report written to:".bright_green().bold(),
            out.display().to_string().cyan()
        );
    }
    Ok(())
}

/// Translate a single member, optionally with a replacement comment
pub fn translate_command(args: TranslateArgs) -> anyhow::Result<()> {
    let config = load_configuration(args.config.as_deref())?;
    let catalog = Arc::new(load_catalog(&args.catalog)?);

    let mut member = catalog
        .find_member(&args.member)
        .with_context(|| format!("Cannot select member {}", args.member))?;
    if let Some(comment) = args.comment {
        member = member.with_comment(comment);
    }
    debug!("Translating {}", member.signature());

    let translator = FreeTextTranslator::new(config, catalog)?;
    let matches = translator.translate(&member)?;

    let rendered = render_matches(&member.signature(), &matches, args.format)?;
    write_output(&rendered, None)?;
    Ok(())
}

/// Print default configuration in YAML format
pub fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default docoracle configuration".dimmed());
    println!("{}", "# Save this to a file and customize as needed".dimmed());
    println!("{}", "# Usage: docoracle analyze --config your-config.yml <catalog>".dimmed());
    println!();

    let config = DocOracleConfig::default();
    let yaml_output = serde_yaml::to_string(&config)?;
    println!("{}", yaml_output);

    Ok(())
}

/// Initialize a configuration file with defaults
pub fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        eprintln!(
            "{} {}",
            "❌ Configuration file already exists:".red(),
            args.output.display()
        );
        eprintln!("   Use --force to overwrite or choose a different name with --output");
        std::process::exit(1);
    }

    DocOracleConfig::default().to_yaml_file(&args.output)?;

    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    println!();
    println!("{}", "📝 Next steps:".bright_blue().bold());
    println!("   1. Edit the configuration file to tune the phrase lists and matching rules");
    println!(
        "   2. Run analysis with: {}",
        format!("docoracle analyze --config {} <catalog>", args.output.display()).cyan()
    );
    println!();
    println!("{}", "🔧 Key settings you can customize:".bright_blue().bold());

    #[derive(Tabled)]
    struct CustomizationRow {
        setting: String,
        description: String,
    }

    let customization_rows = vec![
        CustomizationRow {
            setting: "detection.equivalence_phrases".to_string(),
            description: "Phrases that declare an exact equivalence".to_string(),
        },
        CustomizationRow {
            setting: "condition.markers".to_string(),
            description: "Words that open a guard clause".to_string(),
        },
        CustomizationRow {
            setting: "matching.rules".to_string(),
            description: "Name matching rules, tried in order".to_string(),
        },
        CustomizationRow {
            setting: "validation.command".to_string(),
            description: "External oracle validator".to_string(),
        },
    ];

    let mut table = Table::new(customization_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);

    Ok(())
}

/// Validate a docoracle configuration file
pub fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "🔍 Validating configuration:".bright_blue().bold(),
        args.config.display().to_string().cyan()
    );
    println!();

    let config = match load_configuration(Some(&args.config)) {
        Ok(config) => {
            println!("{}", "✅ Configuration file is valid!".bright_green().bold());
            println!();
            config
        }
        Err(e) => {
            eprintln!("{} {:#}", "❌ Configuration validation failed:".red(), e);
            println!();
            println!("{}", "🔧 Common issues:".bright_blue().bold());
            println!("   • Check YAML syntax (indentation, colons, quotes)");
            println!("   • Phrase and marker lists must not be empty");
            println!("   • The argument placeholder must contain {{index}}");
            println!();
            println!(
                "{}",
                "💡 Tip: Use 'docoracle print-default-config' to see valid format".dimmed()
            );
            std::process::exit(1);
        }
    };

    display_config_summary(&config);
    Ok(())
}

fn display_config_summary(config: &DocOracleConfig) {
    #[derive(Tabled)]
    struct SummaryRow {
        setting: String,
        value: String,
    }

    let rows = vec![
        SummaryRow {
            setting: "Equivalence phrases".to_string(),
            value: config.detection.equivalence_phrases.len().to_string(),
        },
        SummaryRow {
            setting: "Similarity phrases".to_string(),
            value: config.detection.similarity_phrases.len().to_string(),
        },
        SummaryRow {
            setting: "Guard markers".to_string(),
            value: config.condition.markers.join(", "),
        },
        SummaryRow {
            setting: "Match rules".to_string(),
            value: format!("{:?}", config.matching.rules),
        },
        SummaryRow {
            setting: "Max argument distance".to_string(),
            value: config.resolution.max_argument_distance.to_string(),
        },
        SummaryRow {
            setting: "Oracle selection".to_string(),
            value: format!("{:?}", config.synthesis.oracle_selection),
        },
        SummaryRow {
            setting: "External validator".to_string(),
            value: config
                .validation
                .command
                .as_ref()
                .map(|c| c.join(" "))
                .unwrap_or_else(|| "none".to_string()),
        },
    ];

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
}

/// Load configuration from file or use defaults
pub fn load_configuration(config_path: Option<&Path>) -> anyhow::Result<DocOracleConfig> {
    let config = match config_path {
        Some(path) => DocOracleConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => DocOracleConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn load_catalog(path: &Path) -> anyhow::Result<TypeCatalog> {
    let catalog = TypeCatalog::from_file(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
    info!("Loaded {} types from {}", catalog.len(), path.display());
    Ok(catalog)
}
