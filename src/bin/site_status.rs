use scrapmap::config::Config;
use scrapmap::error::{config_error, ServiceResult};
use scrapmap::sites::source::{DatasetSource, SocrataSource};
use scrapmap::utils::time::{localized_now, parse_instant};
use std::env;

#[tokio::main]
async fn main() -> ServiceResult<()> {
    // Load configuration
    let config = Config::load()?;
    let timezone = config.site_timezone()?;

    // Optional --at flag overrides the evaluation instant
    let at = match instant_argument() {
        Some(raw) => parse_instant(&raw, &timezone)
            .ok_or_else(|| config_error(&format!("Invalid --at value: {}", raw)))?,
        None => localized_now(&timezone),
    };

    // Fetch the dataset directly; no actor needed for a one-shot listing
    let source = SocrataSource::new(config.dataset_url.clone())?;
    let sites = source.fetch_sites().await?;

    let mut open = 0;
    for site in &sites {
        let is_open = site.is_open_at(at);
        if is_open {
            open += 1;
        }

        println!(
            "{} {} ({})",
            if is_open { "OPEN  " } else { "CLOSED" },
            site.name.as_deref().unwrap_or("unnamed site"),
            site.address.as_deref().unwrap_or("no address"),
        );
    }

    println!();
    println!(
        "{} of {} sites open at {}",
        open,
        sites.len(),
        at.format("%Y-%m-%d %H:%M")
    );

    Ok(())
}

/// Read the value following a `--at` flag, if present
fn instant_argument() -> Option<String> {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--at" {
            return args.next();
        }
    }
    None
}
