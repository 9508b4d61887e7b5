// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::options::{parse_list, ExportFormat, ExportOptions, RegressOptions, ScrapeOptions};
use crate::core::HttpFetcher;
use crate::progress::CliProgress;
use crate::regress::{self, Frame};
use crate::store::{self, DataSet};

#[derive(Debug, PartialEq)]
pub enum Command {
    Scrape {
        scrape: ScrapeOptions,
        export: ExportOptions,
        update_cache: bool,
    },
    Regress {
        input: Option<PathBuf>,
        regress: RegressOptions,
    },
    Help,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    match parse_args(env::args().skip(1))? {
        Command::Help => {
            eprintln!(include_str!("cli_help.txt"));
            Ok(())
        }
        Command::Scrape { scrape, export, update_cache } => run_scrape(&scrape, &export, update_cache),
        Command::Regress { input, regress } => run_regress(input, &regress),
    }
}

fn run_scrape(scrape: &ScrapeOptions, export: &ExportOptions, update_cache: bool) -> Result<(), Box<dyn Error>> {
    let fetcher = HttpFetcher::new()?;
    let mut progress = CliProgress::default();
    let table = crate::scrape::collect_games(&fetcher, scrape, Some(&mut progress))?;
    let ds = table.to_dataset();

    if update_cache {
        store::save_dataset(&ds)?;
    }
    let path = crate::file::export_dataset(export, &ds)?;
    println!("Wrote {} games to {}", table.len(), path.display());
    Ok(())
}

fn run_regress(input: Option<PathBuf>, opts: &RegressOptions) -> Result<(), Box<dyn Error>> {
    let ds: DataSet = match input {
        Some(path) => store::load_dataset_from(&path, store::sep_for(&path))?,
        None => store::load_dataset()?
            .ok_or("no cached scrape; run `cli scrape` first or pass --input")?,
    };

    let frame = Frame::from_dataset(&ds, &opts.target, &opts.features, &opts.dummies)?;
    let transform = opts.transform(frame.dummy_idx);
    let name = opts.model.name();
    logf!("Regress: {} rows, features {:?}, model {}", frame.y.len(), frame.feature_names, opts.model);

    let (x, y) = match opts.test_size {
        Some(size) => {
            let split = regress::train_test_split(&frame.x, &frame.y, size, opts.seed)?;
            let mut model = opts.model.build();
            let report = regress::train_test(
                &split.x_train, &split.y_train, &split.x_test, &split.y_test, &mut model, transform,
            )?;
            println!("{report}");
            (split.x_train, split.y_train)
        }
        None => (frame.x.clone(), frame.y.clone()),
    };

    let mut model = opts.model.build();
    let report = regress::cross_val(&x, &y, &mut model, name, opts.splits, transform)?;
    println!("Features: {}", frame.feature_names.join(", "));
    println!("{report}");

    let predictions = if opts.plot_oof { &report.out_of_fold_predictions } else { &report.final_fold_predictions };
    let preds = predictions.to_vec();
    regress::analysis_plot(&preds, &y.to_vec(), &opts.plot_path)?;
    println!("Diagnostics: {}", opts.plot_path.display());
    Ok(())
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, Box<dyn Error>> {
    let mut args = args.into_iter();
    let Some(sub) = args.next() else {
        return Ok(Command::Help);
    };

    match sub.as_str() {
        "scrape" => parse_scrape(args),
        "regress" => parse_regress(args),
        "-h" | "--help" | "help" => Ok(Command::Help),
        other => Err(format!("Unknown command: {} (expected scrape or regress)", other).into()),
    }
}

fn parse_scrape(mut args: impl Iterator<Item = String>) -> Result<Command, Box<dyn Error>> {
    let mut scrape = ScrapeOptions::default();
    let mut export = ExportOptions::default();
    let mut update_cache = true;

    while let Some(a) = args.next() {
        match a.as_str() {
            "-n" | "--limit" => {
                scrape.limit = args.next().ok_or("Missing value for --limit")?.parse()?;
                if scrape.limit == 0 {
                    return Err("--limit must be at least 1".into());
                }
            }
            "--browse-url" => scrape.browse_url = args.next().ok_or("Missing value for --browse-url")?,
            "-o" | "--out" => export.set_path(&args.next().ok_or("Missing output path")?),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                export.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };
            }
            "--no-headers" => export.include_headers = false,
            "--no-cache" => update_cache = false,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(Command::Scrape { scrape, export, update_cache })
}

fn parse_regress(mut args: impl Iterator<Item = String>) -> Result<Command, Box<dyn Error>> {
    let mut regress = RegressOptions::default();
    let mut input = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "-i" | "--input" => input = Some(PathBuf::from(args.next().ok_or("Missing input path")?)),
            "--target" => regress.target = args.next().ok_or("Missing value for --target")?,
            "--features" => regress.features = parse_list(&args.next().ok_or("Missing value for --features")?),
            "--dummies" => regress.dummies = parse_list(&args.next().ok_or("Missing value for --dummies")?),
            "--model" => regress.model = args.next().ok_or("Missing value for --model")?.parse()?,
            "--poly" => regress.poly = args.next().ok_or("Missing value for --poly")?.parse()?,
            "--no-scale" => regress.scale = false,
            "-k" | "--splits" => regress.splits = args.next().ok_or("Missing value for --splits")?.parse()?,
            "--test-size" => regress.test_size = Some(args.next().ok_or("Missing value for --test-size")?.parse()?),
            "--seed" => regress.seed = args.next().ok_or("Missing value for --seed")?.parse()?,
            "--plot" => regress.plot_path = PathBuf::from(args.next().ok_or("Missing plot path")?),
            "--oof" => regress.plot_oof = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(Command::Regress { input, regress })
}
