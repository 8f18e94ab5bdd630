use anyhow::{Context, Result, bail, format_err};
use clap::{Arg, ArgAction, ArgMatches, Command};
use dialoguer::Confirm;
use indoc::indoc;
use log::{LevelFilter, debug};
use serde::Serialize;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use billing_xml::recurly::{
    Account, AccountBalance, ApiError, Invoice, Notification, Subscription, Transaction,
};
use billing_xml::{Decode, DecoderSettings, decode_batch};

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::exit;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum DocumentKind {
    Account,
    AccountBalance,
    Subscription,
    Subscriptions,
    Invoice,
    Invoices,
    Transaction,
    Errors,
    Notification,
}

impl DocumentKind {
    const NAMES: [&'static str; 9] = [
        "account",
        "account-balance",
        "subscription",
        "subscriptions",
        "invoice",
        "invoices",
        "transaction",
        "errors",
        "notification",
    ];

    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "account" => DocumentKind::Account,
            "account-balance" => DocumentKind::AccountBalance,
            "subscription" => DocumentKind::Subscription,
            "subscriptions" => DocumentKind::Subscriptions,
            "invoice" => DocumentKind::Invoice,
            "invoices" => DocumentKind::Invoices,
            "transaction" => DocumentKind::Transaction,
            "errors" => DocumentKind::Errors,
            "notification" => DocumentKind::Notification,
            _ => return None,
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum OutputFormat {
    Json,
    JsonLines,
}

struct BillingXmlDump {
    settings: DecoderSettings,
    inputs: Vec<String>,
    kind: DocumentKind,
    output_format: OutputFormat,
    output: Box<dyn Write>,
    verbosity_level: Option<LevelFilter>,
}

/// Tries to write a line to a given target, aborts program if fails.
macro_rules! try_writeln {
    ($($arg:tt)*) => (
        match writeln!($($arg)*) {
            Ok(_) => {},
            Err(e) => {
                eprintln!("{}", &e);
                exit(1)
            }
        }
    );
}

impl BillingXmlDump {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let inputs: Vec<String> = matches
            .get_many::<String>("INPUT")
            .ok_or_else(|| format_err!("at least one input is required"))?
            .cloned()
            .collect();

        let kind = matches
            .get_one::<String>("kind")
            .map(String::as_str)
            .unwrap_or("notification");
        let kind = DocumentKind::from_name(kind)
            .ok_or_else(|| format_err!("unknown document kind `{}`", kind))?;

        let output_format = match matches.get_one::<String>("output-format").map(String::as_str) {
            Some("jsonl") => OutputFormat::JsonLines,
            _ => OutputFormat::Json,
        };

        let num_threads = match (
            cfg!(feature = "multithreading"),
            matches.get_one::<usize>("num-threads").copied(),
        ) {
            (true, Some(number)) => number,
            (true, None) => 0,
            (false, None) => 1,
            (false, Some(_)) => {
                eprintln!(
                    "turned on threads, but library was compiled without `multithreading` feature! using fallback sequential decoding"
                );
                1
            }
        };

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            3 => Some(LevelFilter::Trace),
            _ => {
                eprintln!("using more than  -vvv does not affect verbosity level");
                Some(LevelFilter::Trace)
            }
        };

        let output: Box<dyn Write> = match matches.get_one::<String>("output-target") {
            Some(path) => {
                let file =
                    Self::create_output_file(path, !matches.get_flag("no-confirm-overwrite"))
                        .with_context(|| {
                            format!("An error occurred while creating output file at `{path}`")
                        })?;
                Box::new(file)
            }
            None => Box::new(io::stdout()),
        };

        Ok(BillingXmlDump {
            settings: DecoderSettings::new()
                .num_threads(num_threads)
                .preserve_whitespace(matches.get_flag("preserve-whitespace"))
                .max_document_size(matches.get_one::<usize>("max-size").copied()),
            inputs,
            kind,
            output_format,
            output,
            verbosity_level,
        })
    }

    /// Main entry point for `BillingXmlDump`, returns the number of inputs that failed.
    pub fn run(&mut self) -> Result<usize> {
        self.try_to_initialize_logging();

        let mut failures = 0;
        let mut names = Vec::with_capacity(self.inputs.len());
        let mut documents = Vec::with_capacity(self.inputs.len());

        for input in &self.inputs {
            match read_input(input) {
                Ok(bytes) => {
                    names.push(input.clone());
                    documents.push(bytes);
                }
                Err(e) => {
                    eprintln!("{:?}", e);
                    failures += 1;
                }
            }
        }

        debug!("decoding {} inputs as {:?}", documents.len(), self.kind);

        failures += match self.kind {
            DocumentKind::Account => self.dump::<Account>(&names, &documents),
            DocumentKind::AccountBalance => self.dump::<AccountBalance>(&names, &documents),
            DocumentKind::Subscription => self.dump::<Subscription>(&names, &documents),
            DocumentKind::Subscriptions => self.dump::<Vec<Subscription>>(&names, &documents),
            DocumentKind::Invoice => self.dump::<Invoice>(&names, &documents),
            DocumentKind::Invoices => self.dump::<Vec<Invoice>>(&names, &documents),
            DocumentKind::Transaction => self.dump::<Transaction>(&names, &documents),
            DocumentKind::Errors => self.dump::<Vec<ApiError>>(&names, &documents),
            DocumentKind::Notification => self.dump::<Notification>(&names, &documents),
        }?;

        self.output.flush().context("Failed to flush output")?;

        Ok(failures)
    }

    fn dump<T>(&mut self, names: &[String], documents: &[Vec<u8>]) -> Result<usize>
    where
        T: Decode + Serialize + Send,
    {
        let mut failures = 0;

        for (name, result) in names.iter().zip(decode_batch::<T, _>(documents, &self.settings)) {
            match result {
                Ok(record) => {
                    let data = match self.output_format {
                        OutputFormat::Json => serde_json::to_string_pretty(&record)?,
                        OutputFormat::JsonLines => serde_json::to_string(&record)?,
                    };

                    if self.output_format == OutputFormat::Json {
                        try_writeln!(self.output, "Document {}", name);
                    }
                    try_writeln!(self.output, "{}", data);
                }
                Err(e) => {
                    match e.coding_path().as_str() {
                        "" => eprintln!("Failed to decode `{}`: {}", name, e.root_cause()),
                        path => eprintln!(
                            "Failed to decode `{}` at `{}`: {}",
                            name,
                            path,
                            e.root_cause()
                        ),
                    }
                    failures += 1;
                }
            }
        }

        Ok(failures)
    }

    /// If `prompt` is passed, will display a confirmation prompt before overwriting files.
    fn create_output_file(path: impl AsRef<Path>, prompt: bool) -> Result<File> {
        let p = path.as_ref();

        if p.is_dir() {
            bail!(
                "There is a directory at {}, refusing to overwrite",
                p.display()
            );
        }

        if p.exists() {
            if prompt {
                match Confirm::new()
                    .with_prompt(format!(
                        "Are you sure you want to override output file at {}",
                        p.display()
                    ))
                    .default(false)
                    .interact()
                {
                    Ok(true) => Ok(File::create(p)?),
                    Ok(false) => bail!("Cancelled"),
                    Err(e) => bail!(
                        "Failed to write confirmation prompt to term caused by\n{}",
                        e
                    ),
                }
            } else {
                Ok(File::create(p)?)
            }
        } else {
            // Ok to assume p is not an existing directory
            match p.parent() {
                Some(parent) => {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                    Ok(File::create(p)?)
                }
                None => bail!("Output file cannot be root."),
            }
        }
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level {
            if let Err(e) = TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ) {
                eprintln!("Failed to initialize logging: {}", e)
            }
        }
    }
}

/// `-` reads the document from stdin.
fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read document from stdin")?;
        return Ok(bytes);
    }

    fs::read(input).with_context(|| format!("Failed to open file {}", input))
}

fn command() -> Command {
    Command::new("billing_xml_dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility to decode billing provider XML documents into JSON")
        .arg(
            Arg::new("INPUT")
                .required(true)
                .action(ArgAction::Append)
                .help("Documents to decode, `-` reads a document from stdin."),
        )
        .arg(
            Arg::new("kind")
                .short('k')
                .long("kind")
                .value_parser(DocumentKind::NAMES)
                .default_value("notification")
                .help("Sets the type of the documents"),
        )
        .arg(
            Arg::new("num-threads")
                .short('t')
                .long("threads")
                .value_parser(clap::value_parser!(usize))
                .help("Sets the number of worker threads, defaults to number of CPU cores."),
        )
        .arg(
            Arg::new("output-format")
                .short('o')
                .long("format")
                .value_parser(["json", "jsonl"])
                .default_value("json")
                .help("Sets the output format")
                .long_help(indoc!(
                    r#"Sets the output format:
                        "json"  - pretty prints every record, preceded by `Document <input>`.
                        "jsonl" - one compact record per line.
                    "#
                )),
        )
        .arg(
            Arg::new("output-target")
                .long("output")
                .short('f')
                .action(ArgAction::Set)
                .help(indoc!("Writes output to the file specified instead of stdout, errors will still be printed to stderr.
                       Will ask for confirmation before overwriting files, to allow overwriting, pass `--no-confirm-overwrite`
                       Will create parent directories if needed.")),
        )
        .arg(
            Arg::new("no-confirm-overwrite")
                .long("no-confirm-overwrite")
                .action(ArgAction::SetTrue)
                .help(indoc!("When set, will not ask for confirmation before overwriting files, useful for automation")),
        )
        .arg(
            Arg::new("max-size")
                .long("max-size")
                .value_parser(clap::value_parser!(usize))
                .help("Documents larger than this many bytes are rejected without being parsed."),
        )
        .arg(
            Arg::new("preserve-whitespace")
                .long("preserve-whitespace")
                .action(ArgAction::SetTrue)
                .help("When set, whitespace-only text between elements is kept as text nodes."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help(indoc!("Sets debug prints level for the application:
                    -v   - info
                    -vv  - debug
                    -vvv - trace
                    NOTE: trace output is only available in debug builds, as it is extremely verbose.")),
        )
}

fn main() -> Result<()> {
    let matches = command().get_matches();

    let mut app = BillingXmlDump::from_cli_matches(&matches)?;
    let failures = app.run()?;

    if failures > 0 {
        eprintln!("{} input(s) failed to decode", failures);
        exit(1);
    }

    Ok(())
}
