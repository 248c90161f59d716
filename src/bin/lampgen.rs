//! Generates building sprites and UI icons for every grow lamp as PNG files
#![deny(warnings)]

use lampgen::*;
use std::{
    env,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

/// Location of building sprites relative to the output root
const SPRITE_DIR: &str = "Textures/Things/Building/Production";
/// Location of UI icons relative to the output root
const ICON_DIR: &str = "Textures/UI/Icons";

#[derive(Debug)]
struct Args {
    output_dir: PathBuf,
    catalog: Option<PathBuf>,
    threads: usize,
    list: bool,
    dump: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            output_dir: PathBuf::from("."),
            catalog: None,
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            list: false,
            dump: false,
        };
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "lampgen".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    Self::usage(&cmd);
                    std::process::exit(0);
                }
                "-o" => {
                    let dir = args.next().ok_or("-o requires argument")?;
                    result.output_dir = dir.into();
                }
                "-c" => {
                    let catalog = args.next().ok_or("-c requires argument")?;
                    result.catalog.replace(catalog.into());
                }
                "-j" => {
                    let threads: usize = args.next().ok_or("-j requires argument")?.parse()?;
                    if threads == 0 {
                        return Err("-j requires at least one thread".into());
                    }
                    result.threads = threads;
                }
                "-l" => {
                    result.list = true;
                }
                "-d" => {
                    result.dump = true;
                }
                _ => {
                    Self::usage(&cmd);
                    return Err(format!("unexpected argument: {}", arg).into());
                }
            }
        }
        Ok(result)
    }

    fn usage(cmd: &str) {
        eprintln!("Generates grow lamp building sprites and UI icons");
        eprintln!("\nUSAGE:");
        eprintln!("    {} [-o <dir>] [-c <catalog.json>] [-j <threads>] [-l] [-d]", cmd);
        eprintln!("\nARGS:");
        eprintln!("    -o <dir>            output root directory (default: .)");
        eprintln!("    -c <catalog.json>   load fixtures from JSON instead of the built-in catalog");
        eprintln!("    -j <threads>        number of rendering threads (default: number of cores)");
        eprintln!("    -l                  list fixtures and exit");
        eprintln!("    -d                  dump catalog as JSON to stdout and exit");
    }
}

#[cfg(feature = "serde")]
fn catalog_load(path: Option<&Path>) -> Result<Catalog, Error> {
    match path {
        None => Ok(Catalog::builtin()),
        Some(path) => {
            let file = File::open(path)?;
            Ok(tracing::debug_span!("[catalog]", path = %path.display())
                .in_scope(|| Catalog::from_json(std::io::BufReader::new(file)))?)
        }
    }
}

#[cfg(not(feature = "serde"))]
fn catalog_load(path: Option<&Path>) -> Result<Catalog, Error> {
    match path {
        None => Ok(Catalog::builtin()),
        Some(_) => Err("loading catalog requires `serde` feature".into()),
    }
}

#[cfg(feature = "serde")]
fn catalog_dump(catalog: &Catalog) -> Result<(), Error> {
    catalog.to_json(std::io::stdout().lock())?;
    println!();
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn catalog_dump(_catalog: &Catalog) -> Result<(), Error> {
    Err("dumping catalog requires `serde` feature".into())
}

/// Write image as PNG into `path`
fn save(canvas: &Canvas, path: &Path) -> Result<(), Error> {
    let file = BufWriter::new(File::create(path)?);
    canvas.write_png(file)?;
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let catalog = catalog_load(args.catalog.as_deref())?;
    if args.list {
        print!("{}", catalog);
        return Ok(());
    }
    if args.dump {
        return catalog_dump(&catalog);
    }

    let sprite_dir = args.output_dir.join(SPRITE_DIR);
    let icon_dir = args.output_dir.join(ICON_DIR);
    fs::create_dir_all(&sprite_dir)?;
    fs::create_dir_all(&icon_dir)?;

    let rendered = tracing::debug_span!("[render_all]", threads = args.threads)
        .in_scope(|| render_all(&catalog, args.threads));

    let save_span = tracing::debug_span!("[save]");
    let _guard = save_span.enter();
    for item in rendered.iter() {
        let (dir, tag) = match item.variant {
            Variant::Full => (&sprite_dir, "[sprite]"),
            Variant::Icon => (&icon_dir, "[icon]  "),
        };
        let path = dir.join(format!("{}.png", item.spec.identifier()));
        save(&item.canvas, &path)?;
        let shown = path.strip_prefix(&args.output_dir).unwrap_or(&path);
        println!("  {} {}", tag, shown.display());
    }
    println!("\nDone: {} PNGs written.", rendered.len());

    Ok(())
}
