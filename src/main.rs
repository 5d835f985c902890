//! Review console - command-line client for an AI-powered code review
//! service.
//!
//! Reads a source file, submits it for review, polls until the analysis
//! shows up, and prints it.

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use review_console::config::{Args, Config};
use review_console::error::Result;
use review_console::poller::Phase;
use review_console::session::ReviewSession;
use review_console::types::{AnalysisResult, ReviewRequest};
use review_console::VERSION;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let config = Config::from(&args);

    info!("Review Console v{}", VERSION);
    info!("Service: {}", config.api_url);

    let code = std::fs::read_to_string(&args.file)?;
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown.file".to_string());

    let request = ReviewRequest {
        filename: filename.clone(),
        language: args.language,
        code,
        pr_id: args.pr_id.clone(),
    };

    let session = ReviewSession::new(&config)?;
    let pr_id = session.submit(&request).await?;

    println!("Submitted {} as {}; waiting for analysis...", filename, pr_id);

    match session.wait_for_result().await {
        Phase::Found(analysis) => {
            print_analysis(&filename, &analysis);
            Ok(())
        }
        Phase::Failed(kind) => {
            eprintln!("Review of {} failed ({} error)", pr_id, kind);
            std::process::exit(1);
        }
        phase => {
            // Only reachable if nothing was tracked, which submit rules out
            eprintln!("Unexpected phase: {:?}", phase);
            std::process::exit(1);
        }
    }
}

/// Print the decoded analysis as plain text.
fn print_analysis(filename: &str, analysis: &AnalysisResult) {
    println!();
    println!(
        "{} - quality score {:.0}/100",
        filename, analysis.quality_score.final_score
    );
    println!(
        "security: {} | complexity: {} | maintainability: {:.1}",
        analysis.quality_score.security_risk,
        analysis.quality_score.cyclomatic_complexity,
        analysis.quality_score.maintainability_index
    );

    println!();
    println!("== Summary ==");
    println!("{}", analysis.documentation.summary);

    println!();
    println!("== Issues ({}) ==", analysis.review.len());
    for issue in &analysis.review {
        println!(
            "[{}] line {} - {}: {}",
            issue.severity, issue.line, issue.issue_type, issue.description
        );
        println!("    suggestion: {}", issue.suggestion);
    }

    println!();
    println!("== Documentation ==");
    println!("{}", analysis.documentation.function_docs);
    if !analysis.documentation.developer_notes.is_empty() {
        println!();
        println!("{}", analysis.documentation.developer_notes);
    }

    println!();
    println!("== Tests ==");
    println!("{}", analysis.test_cases.unit_tests);
    if !analysis.test_cases.edge_cases.is_empty() {
        println!();
        println!("Edge cases:");
        for edge_case in &analysis.test_cases.edge_cases {
            println!("  - {}", edge_case);
        }
    }
    if !analysis.test_cases.risk_assessment.is_empty() {
        println!();
        println!("Risk: {}", analysis.test_cases.risk_assessment);
    }
}
