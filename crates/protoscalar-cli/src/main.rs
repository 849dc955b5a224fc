//! protoscalar - Generate native accessors for structured scalar protobuf fields
//!
//! This tool reads serialized `FileDescriptorSet`s (as produced by
//! `protoc --include_imports --descriptor_set_out`), finds every field typed
//! as a protoscalar proxy message or annotated with `protoscalar.scalar_type`,
//! and writes the generated Rust fragments for each message.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use prost_reflect::{DescriptorPool, MessageDescriptor};
use protoscalar_core::codegen::{generate_message, GeneratorConfig, GeneratorFactory};
use protoscalar_core::descriptor::load_descriptor_set;
use protoscalar_core::{proto, FieldSourceGenerator};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Generate native accessors for timestamp, decimal and unique-id protobuf fields
#[derive(Parser, Debug)]
#[command(name = "protoscalar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Output directory for generated fragment files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "rust")]
    format: OutputFormat,

    /// Only generate for these messages (fully-qualified, repeatable)
    #[arg(short, long = "message")]
    messages: Vec<String>,

    /// Crate path generated code uses to reach the runtime
    #[arg(long, default_value = "::protoscalar_core")]
    runtime_path: String,

    /// Treat proxy-typed fields as ordinary messages
    #[arg(long)]
    no_extended_types: bool,

    /// Spaces per indentation level in generated code
    #[arg(long, default_value = "4")]
    indent: usize,

    /// Dry run - don't write files, just show what would be generated
    #[arg(long)]
    dry_run: bool,

    /// Overwrite existing files
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single descriptor set file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of descriptor set files to process
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Output format for generated code
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One `<message>.rs` fragment file per message
    Rust,
    /// One line per extended field (for scripting)
    Summary,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .extended_types(!self.no_extended_types)
            .runtime_path(self.runtime_path.as_str())
            .indent_str(" ".repeat(self.indent))
    }
}

#[derive(Debug, Default)]
struct GenerationStats {
    descriptor_sets: usize,
    messages_scanned: usize,
    messages_generated: usize,
    fields_generated: usize,
    written: usize,
}

impl GenerationStats {
    fn print_summary(&self) {
        info!(
            "Summary: {} descriptor set(s), {} messages scanned, {} with extended fields ({} fields), {} written",
            self.descriptor_sets,
            self.messages_scanned,
            self.messages_generated,
            self.fields_generated,
            self.written
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let stats = run(&cli)?;
    if !cli.dry_run {
        stats.print_summary();
    }
    Ok(())
}

/// Dispatch based on input mode
fn run(cli: &Cli) -> Result<GenerationStats> {
    let factory = GeneratorFactory::new(cli.generator_config());
    let mut stats = GenerationStats::default();

    if let Some(ref file) = cli.input.file {
        process_single_file(cli, &factory, file, &mut stats)?;
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(cli, &factory, directory, &mut stats)?;
    } else {
        bail!("Either --file or --directory must be specified")
    }

    Ok(stats)
}

/// Process a single descriptor set file
fn process_single_file(
    cli: &Cli,
    factory: &GeneratorFactory,
    file: &Path,
    stats: &mut GenerationStats,
) -> Result<()> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    let pool = load_pool(file)?;
    process_pool(cli, factory, &pool, stats)
}

/// Process a directory of descriptor sets recursively
fn process_directory(
    cli: &Cli,
    factory: &GeneratorFactory,
    directory: &Path,
    stats: &mut GenerationStats,
) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() || !is_descriptor_set(path) {
            trace!("Skipping: {}", path.display());
            continue;
        }

        debug!("Processing descriptor set: {}", path.display());
        let pool = match load_pool(path) {
            Ok(pool) => pool,
            Err(e) => {
                // Unreadable inputs are skipped; generation errors below are not
                warn!("Error loading {}: {:#}", path.display(), e);
                continue;
            }
        };
        process_pool(cli, factory, &pool, stats)
            .with_context(|| format!("Generation failed for {}", path.display()))?;
    }

    Ok(())
}

/// Whether a path looks like a serialized descriptor set
fn is_descriptor_set(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let known_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_lowercase().as_str(),
                "pb" | "desc" | "binpb" | "protoset"
            )
        });
    !hidden && known_extension
}

/// Load a descriptor set into a pool
fn load_pool(path: &Path) -> Result<DescriptorPool> {
    trace!("Reading {}", path.display());
    load_descriptor_set(path)
        .with_context(|| format!("Failed to load descriptor set: {}", path.display()))
}

/// Packages whose messages never carry extended fields. Descriptor pools
/// always hold the well-known types.
const SKIPPED_PACKAGES: [&str; 2] = [proto::PACKAGE, "google.protobuf"];

/// Whether a message should be generated for
fn wants_message(cli: &Cli, message: &MessageDescriptor) -> bool {
    let package = message.package_name();
    if message.is_map_entry() || SKIPPED_PACKAGES.iter().any(|skipped| *skipped == package) {
        return false;
    }
    cli.messages.is_empty() || cli.messages.iter().any(|m| m == message.full_name())
}

fn process_pool(
    cli: &Cli,
    factory: &GeneratorFactory,
    pool: &DescriptorPool,
    stats: &mut GenerationStats,
) -> Result<()> {
    stats.descriptor_sets += 1;

    for message in pool.all_messages().filter(|m| wants_message(cli, m)) {
        stats.messages_scanned += 1;

        match cli.format {
            OutputFormat::Summary => {
                for (ordinal, field) in message.fields().enumerate() {
                    if let Some(generator) = factory.create(&field, ordinal)? {
                        let plan = generator.plan();
                        println!(
                            "{}: {} ({}, {:?}-backed)",
                            plan.full_name(),
                            plan.ty(),
                            plan.cardinality(),
                            plan.backing()
                        );
                        stats.fields_generated += 1;
                    }
                }
            }
            OutputFormat::Rust => {
                let Some(fragments) = generate_message(factory, &message)? else {
                    trace!("No extended fields in {}", message.full_name());
                    continue;
                };
                stats.messages_generated += 1;
                stats.fields_generated += fragments.fields().len();

                let output_path = cli.output.join(format!("{}.rs", fragments.full_name()));
                let content = fragments.render();
                if cli.dry_run {
                    println!("Would write: {}", output_path.display());
                    if cli.verbose > 0 {
                        println!("---");
                        println!("{}", content);
                        println!("---");
                    }
                } else {
                    write_fragment_file(&output_path, &content, cli.force)?;
                    println!("Wrote {}", output_path.display());
                    stats.written += 1;
                }
            }
        }
    }

    Ok(())
}

/// Write a fragment file, refusing to clobber existing files unless forced
fn write_fragment_file(output_path: &Path, content: &str, force: bool) -> Result<()> {
    // Create parent directories
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    if output_path.exists() && !force {
        bail!(
            "File already exists: {} (use --force to overwrite)",
            output_path.display()
        );
    }

    let mut file = fs::File::create(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", output_path.display()))?;

    Ok(())
}
