//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::adapters::toml_config::AppConfig;
use crate::app::container::AppContainer;
use crate::cli::args::{ChaptersArgs, ConcatArgs, ProbeArgs};
use crate::domain::model::{Chapter, ConcatRequest};
use crate::output::ffmetadata;
use crate::utils::path::expand_inputs;
use crate::utils::time::format_timestamp;

/// Execute the concat command
pub async fn concat(container: &dyn AppContainer, config: &AppConfig, args: ConcatArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs, &config.chapters.extensions)?;
    info!("Concatenating {} inputs into {}", inputs.len(), args.output.display());

    let interactor = container.concat_interactor();

    if args.dry_run {
        let (_, chapters) = interactor
            .chapters(&inputs, &args.titles)
            .await
            .context("Failed to plan chapters")?;
        display_chapters(&chapters);
        return Ok(());
    }

    let request = ConcatRequest::new(inputs, args.output)
        .with_titles(args.titles)
        .with_output_title(args.output_title)
        .with_overwrite(args.overwrite);

    let report = interactor
        .execute(&request)
        .await
        .context("Concatenation failed")?;

    println!(
        "Wrote {} ({} chapters, {})",
        report.output.display(),
        report.chapters,
        format_timestamp(report.total_duration)
    );
    Ok(())
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, config: &AppConfig, args: ProbeArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs, &config.chapters.extensions)?;
    let report = container.inspect_interactor().inspect(&inputs).await;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize probe report to JSON")?;
        println!("{}", json);
    } else {
        for entry in &report.entries {
            match (&entry.duration, &entry.error) {
                (Some(duration), _) => {
                    println!("{}  {}", format_timestamp(*duration), entry.path.display())
                }
                (None, Some(error)) => println!("{:<12}  {}", "error", error),
                (None, None) => {}
            }
        }
    }

    match report.failures() {
        0 => Ok(()),
        failed => Err(anyhow::anyhow!(
            "{} of {} inputs could not be probed",
            failed,
            report.entries.len()
        )),
    }
}

/// Chapter as printed by `chapters --json`
#[derive(Debug, Serialize)]
struct ChapterView<'a> {
    index: usize,
    title: &'a str,
    start: f64,
    end: f64,
}

impl<'a> From<&'a Chapter> for ChapterView<'a> {
    fn from(chapter: &'a Chapter) -> Self {
        Self {
            index: chapter.index,
            title: &chapter.title,
            start: chapter.start.as_secs_f64(),
            end: chapter.end.as_secs_f64(),
        }
    }
}

/// Execute the chapters command
pub async fn chapters(container: &dyn AppContainer, config: &AppConfig, args: ChaptersArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs, &config.chapters.extensions)?;
    let (_, chapters) = container
        .concat_interactor()
        .chapters(&inputs, &args.titles)
        .await
        .context("Failed to plan chapters")?;

    if args.ffmetadata {
        print!(
            "{}",
            ffmetadata::render(args.output_title.as_deref(), &chapters, config.timebase()?)
        );
    } else if args.json {
        let views: Vec<ChapterView> = chapters.iter().map(ChapterView::from).collect();
        let json = serde_json::to_string_pretty(&views)
            .context("Failed to serialize chapters to JSON")?;
        println!("{}", json);
    } else {
        display_chapters(&chapters);
    }
    Ok(())
}

/// Display chapters in human-readable format
fn display_chapters(chapters: &[Chapter]) {
    println!("Chapters");
    println!("========");
    for chapter in chapters {
        println!("{}", chapter);
    }
    if let Some(last) = chapters.last() {
        println!();
        println!("Total: {}", format_timestamp(last.end));
    }
}
