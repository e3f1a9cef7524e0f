use core::time::Duration;

use anyhow::Context as _;
use gcscr::{
    Record, build_page_url, extract_records, find_last_page, scrape::fetch_document,
};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use scraper::Html;
use url::Url;

const PB_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} pages ({msg}, {eta})";

const PB_CHARS: &str = "█▓▒░  ";

/// Where survey pages come from.
pub trait PageSource {
    async fn page(&mut self, page: u32) -> anyhow::Result<Html>;
}

/// Live survey pages, with a fixed pause before every page after the first.
pub struct Http {
    pub client: Client,
    pub base: Url,
    pub delay: Duration,
}

impl PageSource for Http {
    async fn page(&mut self, page: u32) -> anyhow::Result<Html> {
        if page > 1 {
            tokio::time::sleep(self.delay).await;
        }
        let url = build_page_url(&self.base, page);
        tracing::debug!(target: "fetch", "[Page #{page}] {url}");
        fetch_document(&self.client, &url)
            .await
            .with_context(|| format!("[Page #{page}] fetch failed"))
    }
}

fn progress_bar(pages: u32, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(u64::from(pages));
    if let Ok(style) = ProgressStyle::with_template(PB_STYLE) {
        pb.set_style(style.progress_chars(PB_CHARS));
    }
    pb
}

/// Fetches every page of the search, in order, and returns all records.
///
/// Page 1 decides the page count. Any failed fetch or unexpected page
/// structure aborts the whole run.
pub async fn work<S: PageSource>(source: &mut S, progress: bool) -> anyhow::Result<Vec<Record>> {
    let (last_page, mut records) = {
        let document = source.page(1).await?;
        let last_page = find_last_page(&document).context("cannot tell the number of pages")?;
        let records = extract_records(&document).context("[Page #1] unexpected table layout")?;
        (last_page, records)
    };
    tracing::info!(target: "fetch", "\x1b[36m{last_page} pages to fetch\x1b[0m");

    let pb = progress_bar(last_page, progress);
    pb.inc(1);
    pb.set_message(format!("{} records", records.len()));

    for page in 2..=last_page {
        let mut block = {
            let document = source.page(page).await?;
            extract_records(&document)
                .with_context(|| format!("[Page #{page}] unexpected table layout"))?
        };
        tracing::debug!(target: "fetch", "[Page #{page}] {} records", block.len());

        records.append(&mut block);
        pb.inc(1);
        pb.set_message(format!("{} records", records.len()));
    }

    pb.finish_with_message(format!("{} records", records.len()));
    tracing::info!(target: "fetch", "\x1b[36mextraction finished: {} records\x1b[0m", records.len());
    Ok(records)
}
