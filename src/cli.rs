// src/cli.rs
use std::{env, fs, path::PathBuf};

use crate::export::{self, ExportOutcome};
use crate::params::{Params, Source};
use crate::{dedup, net, scrape, store};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_cli()?;

    let doc = match params.source.as_ref().ok_or("Specify --url or --file")? {
        Source::Url(url) => net::http_get(url)?,
        Source::File(path) => fs::read_to_string(path)?,
    };

    let mut reviews = scrape::extract_reviews(&doc);
    crate::logf!("extracted {} review rows", reviews.len());

    // A browser would hand us absolute hrefs; a fetched page may carry
    // relative ones. File input is exported as-is.
    if let Some(Source::Url(page)) = &params.source {
        if let Ok(base) = url::Url::parse(page) {
            scrape::absolutize_links(&mut reviews, &base);
        }
    }

    let mut seen = store::SeenIds::load(&params.store)?;
    let fresh = dedup::filter_new(reviews, &seen);
    crate::logf!("{} new after seen-id filter ({} already exported)", fresh.len(), seen.len());

    if params.dry_run {
        for r in &fresh {
            println!("{}\t{}\t{}\t{}\t{}", r.review_type, r.name, r.email, r.score, r.link);
        }
        println!("{} new reviews (dry run, nothing sent)", fresh.len());
        return Ok(());
    }

    // The four user notices; errors leave the store untouched so re-running
    // resends the same batch.
    match export::send_new(&fresh, &mut seen, |body| net::post_json(&params.endpoint, body))? {
        ExportOutcome::NothingNew => println!("No new reviews to add."),
        ExportOutcome::Sent(n) => println!("Successfully added {} new reviews.", n),
        ExportOutcome::Rejected { status, reason } => {
            return Err(format!("Error sending reviews: HTTP {} {}", status, reason).into());
        }
        ExportOutcome::Failed(detail) => {
            return Err(format!("Error sending reviews: {}", detail).into());
        }
    }
    Ok(())
}

fn parse_cli() -> Result<Params, Box<dyn std::error::Error>> {
    let mut params = Params::new();

    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "-u" | "--url" => {
                let v = args.next().ok_or("Missing value for --url")?;
                set_source(&mut params, Source::Url(v))?; }
            "-f" | "--file" => {
                let v = args.next().ok_or("Missing value for --file")?;
                set_source(&mut params, Source::File(PathBuf::from(v)))?; }
            "--endpoint" => params.endpoint = args.next().ok_or("Missing value for --endpoint")?,
            "--store" => params.store = PathBuf::from(args.next().ok_or("Missing value for --store")?),
            "-n" | "--dry-run" => params.dry_run = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    Ok(params)
}

fn set_source(params: &mut Params, src: Source) -> Result<(), Box<dyn std::error::Error>> {
    if params.source.is_some() {
        return Err("Give --url or --file, not both".into());
    }
    params.source = Some(src);
    Ok(())
}
