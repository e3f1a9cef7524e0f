mod fetch;
mod prompt;

use core::time::Duration;
use std::path::PathBuf;

use gcscr::{Degree, SurveyQuery, build_base_url, config, output};
use url::Url;

#[derive(clap::Parser)]
#[command(version, about)]
struct Args {
    /// Institution filter; asked for interactively when omitted
    #[arg(short, long)]
    institution: Option<String>,
    /// Program filter; asked for interactively when omitted
    #[arg(short, long)]
    program: Option<String>,
    /// PsyD, IND, Other, EdD, JD, MBA, MFA, Masters, PhD or none; a menu is shown when omitted
    #[arg(short, long)]
    degree: Option<Degree>,
    #[arg(long, env = "GRADCAFE_ENDPOINT", default_value = config::SURVEY_URL)]
    endpoint: Url,
    #[arg(short, long, value_name = "dir", default_value = config::OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Pause between two page requests
    #[arg(long, value_name = "ms", default_value_t = config::PAGE_DELAY.as_millis() as u64)]
    delay_ms: u64,
    /// Defaults to a random desktop browser
    #[arg(long)]
    user_agent: Option<String>,
    #[arg(long)]
    no_progress: bool,
}

fn or_none(s: &str) -> &str {
    if s.trim().is_empty() { "[none]" } else { s }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::init_timed();

    let args = Args::parse();

    let query = SurveyQuery {
        institution: match args.institution {
            Some(s) => s,
            None => prompt::ask("Institution (blank for none): ")?,
        },
        program: match args.program {
            Some(s) => s,
            None => prompt::ask("Program (blank for none): ")?,
        },
        degree: match args.degree {
            Some(d) => d,
            None => prompt::select_degree()?,
        },
    };
    tracing::info!(
        target: "main",
        "\x1b[32mquery\x1b[0m institution = {}, program = {}, degree = {}",
        or_none(&query.institution),
        or_none(&query.program),
        query.degree,
    );

    let user_agent = args
        .user_agent
        .as_deref()
        .unwrap_or_else(|| gcscr::scrape::random_user_agent());
    tracing::debug!(target: "main", "user-agent: {user_agent}");

    let mut source = fetch::Http {
        client: gcscr::scrape::basic(user_agent)?,
        base: build_base_url(&args.endpoint, &query),
        delay: Duration::from_millis(args.delay_ms),
    };
    tracing::debug!(target: "main", "base url: {}", source.base);

    let records = fetch::work(&mut source, !args.no_progress).await?;

    let name = output::file_name(&query, chrono::Local::now().date_naive());
    let path = output::save(&args.output_dir, &name, &records)?;
    println!("saved to {}", path.display());

    Ok(())
}
