// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use notequiz::config::{validate_config, QuizFile};
use notequiz::generators::{Sequence, SequenceGenerator};
use notequiz::music::NoteAlphabet;
use notequiz::render::timing::bpm_for_frame_duration;
use notequiz::render::{asset_table, compositor, ManifestCompositor, VideoPlan};

fn print_usage() {
    println!("NOTEQUIZ - Note recognition drill generator");
    println!();
    println!("Usage: notequiz <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  generate                Generate a note sequence and write it to a text file");
    println!("  plan                    Generate a sequence and write the video render manifest");
    println!("  assets                  List the image and voice assets each note needs");
    println!("  validate <FILE>         Check a quiz config file");
    println!();
    println!("Options:");
    println!("  --config <FILE>         Quiz config (YAML)");
    println!("  --count <N>             Number of notes (default 30)");
    println!("  --seed <S>              Fixed random seed");
    println!("  --notes <A,B,..>        Comma separated note alphabet (default B#,C,D,E)");
    println!("  --out <FILE>            Sequence text file (default test-notes.txt)");
    println!("  --manifest <FILE>       Render manifest file (plan only)");
    println!("  --help                  Show this help message");
}

/// Command line overrides applied on top of the config file
#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    count: Option<i64>,
    seed: Option<u64>,
    notes: Option<NoteAlphabet>,
    out: Option<PathBuf>,
    manifest: Option<PathBuf>,
}

impl CliOptions {
    fn parse(args: &[String]) -> Result<Self> {
        let mut options = Self::default();
        let mut iter = args.iter();
        while let Some(flag) = iter.next() {
            let mut value = || iter.next().ok_or_else(|| anyhow!("{} requires a value", flag));
            match flag.as_str() {
                "--config" => options.config = Some(PathBuf::from(value()?)),
                "--count" => {
                    let raw = value()?;
                    options.count = Some(
                        raw.parse()
                            .map_err(|_| anyhow!("Invalid note count: {}", raw))?,
                    );
                }
                "--seed" => {
                    let raw = value()?;
                    options.seed =
                        Some(raw.parse().map_err(|_| anyhow!("Invalid seed: {}", raw))?);
                }
                "--notes" => options.notes = Some(NoteAlphabet::parse_list(value()?)),
                "--out" => options.out = Some(PathBuf::from(value()?)),
                "--manifest" => options.manifest = Some(PathBuf::from(value()?)),
                other => bail!("Unknown option: {}", other),
            }
        }
        Ok(options)
    }

    /// Load the config file (or defaults) and apply overrides
    fn resolve(self) -> Result<QuizFile> {
        let mut config = match &self.config {
            Some(path) => QuizFile::load(path)?,
            None => QuizFile::default(),
        };
        if let Some(count) = self.count {
            config.quiz.count = count;
        }
        if let Some(seed) = self.seed {
            config.quiz.seed = Some(seed);
        }
        if let Some(notes) = self.notes {
            config.quiz.notes = notes;
        }
        if let Some(out) = self.out {
            config.output.sequence_file = out;
        }
        if let Some(manifest) = self.manifest {
            config.output.manifest_file = manifest;
        }
        config.validate().context("Invalid quiz settings")?;
        debug!(?config, "resolved quiz config");
        Ok(config)
    }
}

fn generate(config: &QuizFile) -> Result<Sequence> {
    let mut generator =
        SequenceGenerator::from_seed_option(config.quiz.notes.clone(), config.quiz.seed);
    let sequence = generator.generate(config.quiz.count)?;
    sequence.save(&config.output.sequence_file)?;

    info!(
        notes = sequence.len(),
        alphabet = generator.alphabet().len(),
        seed = ?config.quiz.seed,
        file = %config.output.sequence_file.display(),
        "note sequence written"
    );
    Ok(sequence)
}

fn run_generate(config: &QuizFile) -> Result<()> {
    let sequence = generate(config)?;
    println!("{}", sequence.to_text());
    Ok(())
}

fn run_plan(config: &QuizFile) -> Result<()> {
    let sequence = generate(config)?;
    let plan = VideoPlan::build(&sequence, &config.render, &config.output.video_file);
    println!("Num of cards: {}", plan.len());

    let mut backend = ManifestCompositor::new(&config.output.manifest_file);
    compositor::run(&mut backend, &plan)?;

    println!(
        "Plan for {:?}: {:.1}s, {} frames at {} fps",
        plan.output,
        plan.total_duration(),
        plan.frame_count(),
        plan.fps
    );
    println!("Manifest written to {:?}", backend.path());
    Ok(())
}

fn run_assets(config: &QuizFile) -> Result<()> {
    for entry in asset_table(&config.quiz.notes, &config.render) {
        let status = if entry.is_present() { "ok" } else { "missing" };
        println!(
            "{:<4} {:<4} {:<10} {:?} {:?} [{}]",
            entry.label,
            entry.display_text,
            entry.spoken_name,
            entry.image,
            entry.voice,
            status
        );
    }
    Ok(())
}

fn run_validate(args: &[String]) -> Result<()> {
    let path = args
        .first()
        .ok_or_else(|| anyhow!("validate requires a config file path"))?;
    let config = validate_config(path)?;
    let frame_duration = config.render.effective_frame_duration();
    println!(
        "{}: ok ({} notes from {} labels, {:.2}s per card, {:.0} BPM)",
        path,
        config.quiz.count,
        config.quiz.notes.len(),
        frame_duration,
        bpm_for_frame_duration(frame_duration)
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("NOTEQUIZ - Note recognition drill generator");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let rest = &args[2..];
    match args[1].as_str() {
        "generate" => run_generate(&CliOptions::parse(rest)?.resolve()?)?,
        "plan" => run_plan(&CliOptions::parse(rest)?.resolve()?)?,
        "assets" => run_assets(&CliOptions::parse(rest)?.resolve()?)?,
        "validate" => run_validate(rest)?,
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
