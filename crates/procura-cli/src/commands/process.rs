//! Process command - extract order fields from a single document.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use procura_core::vocabulary::AUTO_CORRECT_THRESHOLD;
use procura_core::{
    CaptureScope, ExtractionReport, ExtractionResult, HeuristicPipeline, OrderParser,
    ProcuraConfig, Vocabulary, extract_document_text,
};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text, `-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip product and type keyword detection
    #[arg(long)]
    no_keywords: bool,

    /// How far a labelled value may extend
    #[arg(long, value_enum)]
    capture_scope: Option<ScopeArg>,

    /// Show how each field was found
    #[arg(long)]
    show_confidence: bool,

    /// JSON array of known manufacturer names to check the result against
    #[arg(long)]
    manufacturers: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for per-document output files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ScopeArg {
    /// Values stop at the end of their line
    Line,
    /// Values may run across lines
    Document,
}

impl From<ScopeArg> for CaptureScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Line => CaptureScope::Line,
            ScopeArg::Document => CaptureScope::Document,
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.no_keywords {
        config.extraction.keyword_detection = false;
    }
    if let Some(scope) = args.capture_scope {
        config.extraction.capture_scope = scope.into();
    }

    let vocabulary = args
        .manufacturers
        .as_deref()
        .map(load_vocabulary)
        .transpose()?;

    info!("Processing {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    pb.set_message("Reading document...");
    let text = read_document(&args.input, &config)?;

    pb.set_message("Extracting fields...");
    let pipeline = HeuristicPipeline::with_config(&config.extraction);
    let report = pipeline.parse(&text)?;

    pb.finish_and_clear();

    let output = format_result(&report.result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if let Some(vocabulary) = &vocabulary {
        report_manufacturer_match(&report, vocabulary);
    }

    if args.show_confidence {
        eprintln!();
        eprint!("{}", format_confidence(&report));
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read the text of a document: PDF, plain text, or stdin for `-`.
pub fn read_document(input: &Path, config: &ProcuraConfig) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(input)?;
            Ok(extract_document_text(&data, &config.pdf)?)
        }
        "txt" | "text" => Ok(fs::read_to_string(input)?),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

fn load_vocabulary(path: &Path) -> anyhow::Result<Vocabulary> {
    let json = fs::read_to_string(path)?;
    Vocabulary::from_json(&json)
        .map_err(|e| anyhow::anyhow!("Invalid manufacturer list {}: {}", path.display(), e))
}

fn report_manufacturer_match(report: &ExtractionReport, vocabulary: &Vocabulary) {
    let extracted = &report.result.manufacturer;
    if extracted.is_empty() {
        return;
    }

    match vocabulary.auto_correct(extracted, AUTO_CORRECT_THRESHOLD) {
        Some(known) if known.value == *extracted => {
            eprintln!("{} Manufacturer is a known name", style("✓").green());
        }
        Some(known) => {
            eprintln!(
                "{} Manufacturer '{}' looks like '{}' ({:.0}%)",
                style("ℹ").blue(),
                extracted,
                known.value,
                known.score * 100.0
            );
        }
        None => {
            let suggestions = vocabulary.suggestions(extracted, 3);
            if suggestions.is_empty() {
                eprintln!(
                    "{} Manufacturer '{}' is not in the list",
                    style("!").yellow(),
                    extracted
                );
            } else {
                let names: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
                eprintln!(
                    "{} Manufacturer '{}' is not in the list, closest: {}",
                    style("!").yellow(),
                    extracted,
                    names.join(", ")
                );
            }
        }
    }
}

pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["manufacturer", "product", "type", "quantity", "from", "to"])?;
    wtr.write_record([
        &result.manufacturer,
        &result.product,
        &result.subtype,
        &result.quantity,
        &result.from_location,
        &result.to_location,
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Manufacturer: {}\n", or_dash(&result.manufacturer)));
    output.push_str(&format!("Product:      {}\n", or_dash(&result.product)));
    output.push_str(&format!("Type:         {}\n", or_dash(&result.subtype)));
    output.push_str(&format!("Quantity:     {}\n", or_dash(&result.quantity)));
    output.push_str(&format!("From:         {}\n", or_dash(&result.from_location)));
    output.push_str(&format!("To:           {}\n", or_dash(&result.to_location)));

    output
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn format_confidence(report: &ExtractionReport) -> String {
    let mut output = String::new();

    for (field, found) in &report.matches {
        let how = match &found.method {
            procura_core::extract::MatchMethod::Keyword { trigger } => {
                format!("keyword '{}'", trigger)
            }
            procura_core::extract::MatchMethod::Pattern { index } => {
                format!("pattern #{}", index)
            }
        };
        output.push_str(&format!(
            "{} {:<12} {:>5.1}%  {}\n",
            style("ℹ").blue(),
            field.key(),
            found.confidence * 100.0,
            how
        ));
    }

    for field in &report.missing_fields {
        output.push_str(&format!(
            "{} {:<12} not found\n",
            style("!").yellow(),
            field.key()
        ));
    }

    output.push_str(&format!(
        "{} Processing time: {}ms\n",
        style("ℹ").blue(),
        report.processing_time_ms
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtractionResult {
        ExtractionResult {
            manufacturer: "Acme Corp".to_string(),
            product: "Thrie Beam".to_string(),
            subtype: String::new(),
            quantity: "500".to_string(),
            from_location: "Delhi".to_string(),
            to_location: "Mumbai".to_string(),
        }
    }

    #[test]
    fn test_format_json_uses_wire_names() {
        let json = format_result(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["manufacturer"], "Acme Corp");
        assert_eq!(value["type"], "");
        assert_eq!(value["from"], "Delhi");
        assert_eq!(value["to"], "Mumbai");
    }

    #[test]
    fn test_format_csv() {
        let csv = format_result(&sample(), OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("manufacturer,product,type,quantity,from,to"));
        assert_eq!(lines.next(), Some("Acme Corp,Thrie Beam,,500,Delhi,Mumbai"));
    }

    #[test]
    fn test_format_text_marks_missing() {
        let text = format_result(&sample(), OutputFormat::Text).unwrap();

        assert!(text.contains("Manufacturer: Acme Corp"));
        assert!(text.contains("Type:         -"));
    }

    #[test]
    fn test_read_document_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.docx");
        fs::write(&path, "Manufacturer: Acme").unwrap();

        let err = read_document(&path, &ProcuraConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }

    #[test]
    fn test_read_document_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.txt");
        fs::write(&path, "Manufacturer: Acme Corp").unwrap();

        let text = read_document(&path, &ProcuraConfig::default()).unwrap();
        assert_eq!(text, "Manufacturer: Acme Corp");
    }
}
