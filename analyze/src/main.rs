mod csv;

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use lexis::analyzer::{Analyzer, Profile};
use lexis::common::DEFAULT_WEIGHT;
use lexis::tokenizer::MaxMatchTokenizer;
use lexis::{CustomDictionary, StopWordDict};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "analyze",
    about = "A program to analyze lines from stdin with custom dictionaries."
)]
struct Args {
    /// Word list used by the base tokenizer, in rows of `word[,weight]`.
    #[clap(short = 'i', long)]
    system_in: PathBuf,

    /// Word list of user words merged by the custom profile, in rows of `word[,weight]`.
    #[clap(short = 'u', long)]
    user_in: Option<PathBuf>,

    /// Stop word list, one word per line. The built-in list is used if unspecified.
    #[clap(short = 's', long)]
    stopwords_in: Option<PathBuf>,

    /// Analyzer profile: standard, raw, or custom.
    #[clap(short = 'p', long, default_value = "standard")]
    profile: Profile,

    /// Prints terms separated by spaces.
    #[clap(short = 'w', long)]
    wakachi: bool,
}

/// Parses a `word[,weight]` row. An empty weight field means the default
/// weight. Returns `None` for an empty word.
fn parse_entry(line: &str) -> Result<Option<(String, i32)>, Box<dyn Error>> {
    let row = csv::parse_csv_row(line)?;
    let weight = match row.get(1).map(|w| w.trim()) {
        Some(w) if !w.is_empty() => w.parse()?,
        _ => DEFAULT_WEIGHT,
    };
    let word = row[0].trim();
    if word.is_empty() {
        return Ok(None);
    }
    Ok(Some((word.to_string(), weight)))
}

fn load_dictionary(filename: &Path) -> Result<CustomDictionary, Box<dyn Error>> {
    let mut dict = CustomDictionary::new();
    for (i, line) in BufReader::new(File::open(filename)?).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_entry(&line)? {
            Some((word, weight)) => dict.add_word_with_weight(word, weight),
            None => tracing::warn!(
                filename = %filename.display(),
                line = i + 1,
                "skipped an empty word"
            ),
        }
    }
    dict.rebuild()?;
    Ok(dict)
}

fn load_stop_words(filename: Option<&Path>) -> Result<StopWordDict, Box<dyn Error>> {
    let Some(filename) = filename else {
        return Ok(StopWordDict::with_default_words()?);
    };
    let mut words = vec![];
    for line in BufReader::new(File::open(filename)?).lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(StopWordDict::new(words)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    eprintln!("Loading the dictionaries...");
    let system_dict = load_dictionary(&args.system_in)?;
    let user_dict = match args.user_in.as_deref() {
        Some(filename) => Some(load_dictionary(filename)?),
        None => None,
    };
    let stop_words = load_stop_words(args.stopwords_in.as_deref())?;
    tracing::info!(
        system_words = system_dict.len(),
        user_words = user_dict.as_ref().map_or(0, |d| d.len()),
        stop_words = stop_words.len(),
        profile = %args.profile,
        "loaded dictionaries"
    );

    let mut builder = Analyzer::builder(MaxMatchTokenizer::new(system_dict.reader()))
        .stop_words(stop_words.reader())
        .profile(args.profile);
    if let Some(user_dict) = &user_dict {
        builder = builder.custom_words(user_dict.reader());
    }
    let analyzer = builder.build()?;
    eprintln!("Ready to analyze :)");

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());

    #[allow(clippy::significant_drop_in_scrutinee)]
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        if args.wakachi {
            let words: Vec<_> = analyzer.analyze(&line).map(|t| t.word).collect();
            writeln!(&mut out, "{}", words.join(" "))?;
        } else {
            for t in analyzer.analyze(&line) {
                writeln!(&mut out, "{}\t{}", t.word, t.offset)?;
            }
            writeln!(&mut out, "EOS")?;
        }
    }

    Ok(())
}
