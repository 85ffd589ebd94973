use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yapi_codegen::{
    ApiOptions, EndpointDescriptor, GenerationError, GeneratorConfig, MockOptions,
    MockSynthesizer, MockType, RequestLib, ToolResponse, TypeOptions, Workflow, WorkflowOptions,
    generate_api_code, generate_mock, generate_types, save_artifacts,
};

#[derive(Parser)]
#[command(name = "yapi-codegen")]
#[command(about = "Generate TypeScript types, mock data and request functions from YApi schemas", long_about = None)]
struct Cli {
    /// Config file (defaults to the nearest yapi.config.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the JSON result envelope instead of the bare artifact
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a TypeScript interface from a response schema
    Types(TypesArgs),
    /// Generate mock data from a response schema
    Mock(MockArgs),
    /// Generate a request function from an endpoint descriptor
    Api(ApiArgs),
    /// Run every generator for an endpoint descriptor and optionally save the results
    All(AllArgs),
}

#[derive(Args)]
struct EndpointHints {
    /// Endpoint path, used for naming
    #[arg(long)]
    path: Option<String>,

    /// HTTP method, used for naming
    #[arg(long)]
    method: Option<String>,

    /// Endpoint title
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct TypesArgs {
    /// Response JSON Schema file (use '-' for stdin)
    #[arg(value_name = "SCHEMA")]
    input: String,

    /// Property holding the response payload
    #[arg(long)]
    data_key: Option<String>,

    /// Interface name (derived from --path and --method otherwise)
    #[arg(long)]
    interface_name: Option<String>,

    #[command(flatten)]
    endpoint: EndpointHints,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct MockArgs {
    /// Response JSON Schema file (use '-' for stdin)
    #[arg(value_name = "SCHEMA")]
    input: String,

    /// Property holding the response payload
    #[arg(long)]
    data_key: Option<String>,

    #[arg(long, value_enum)]
    mock_type: Option<MockType>,

    /// Seed for repeatable output
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    endpoint: EndpointHints,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ApiArgs {
    /// Endpoint descriptor JSON file (use '-' for stdin)
    #[arg(value_name = "ENDPOINT")]
    input: String,

    #[arg(long, value_enum)]
    request_lib: Option<RequestLib>,

    /// Response type used in the return annotation
    #[arg(long)]
    interface_name: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct AllArgs {
    /// Endpoint descriptor JSON file with `res_body` (use '-' for stdin)
    #[arg(value_name = "ENDPOINT")]
    input: String,

    /// Project root to write files under; nothing is written without it
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// File name stem for the written files
    #[arg(long)]
    filename: Option<String>,

    #[arg(long, value_enum)]
    request_lib: Option<RequestLib>,

    #[arg(long, value_enum)]
    mock_type: Option<MockType>,

    /// Seed for repeatable mock output
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    no_types: bool,

    #[arg(long)]
    no_mock: bool,

    #[arg(long)]
    no_api: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => GeneratorConfig::load(path),
        None => env::current_dir()
            .map_err(GenerationError::from)
            .and_then(|dir| GeneratorConfig::discover_or_default(&dir)),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) if cli.json => {
            println!("{}", ToolResponse::<()>::failure("config loading", &e).to_json()?);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    match cli.command {
        Command::Types(args) => {
            let options = TypeOptions {
                data_key: args.data_key.unwrap_or(config.data_key),
                interface_name: args.interface_name.or(config.interface_name),
                path: args.endpoint.path,
                method: args.endpoint.method,
                title: args.endpoint.title,
            };
            let result = read_input(&args.input)
                .map_err(GenerationError::from)
                .and_then(|schema| generate_types(&schema, &options));
            emit(
                cli.json,
                "type definition generation",
                result,
                |types| types.type_definition.clone(),
                args.output.as_deref(),
            )
        }
        Command::Mock(args) => {
            let options = MockOptions {
                data_key: args.data_key.unwrap_or(config.data_key),
                mock_type: args.mock_type.unwrap_or(config.mock_type),
                title: args.endpoint.title,
                path: args.endpoint.path,
                method: args.endpoint.method,
            };
            let mut synthesizer = synthesizer(args.seed);
            let result = read_input(&args.input)
                .map_err(GenerationError::from)
                .and_then(|schema| generate_mock(&schema, &options, &mut synthesizer));
            emit(
                cli.json,
                "mock data generation",
                result,
                |mock| mock.json_string.clone(),
                args.output.as_deref(),
            )
        }
        Command::Api(args) => {
            let options = ApiOptions {
                request_lib: args.request_lib.unwrap_or(config.request_lib),
                interface_name: args.interface_name,
            };
            let result = read_input(&args.input)
                .map_err(GenerationError::from)
                .and_then(|text| EndpointDescriptor::from_json(&text))
                .and_then(|endpoint| generate_api_code(&endpoint, &options));
            emit(
                cli.json,
                "api code generation",
                result,
                |api| api.api_code.clone(),
                args.output.as_deref(),
            )
        }
        Command::All(args) => run_all(args, config, cli.json),
    }
}

fn run_all(
    args: AllArgs,
    mut config: GeneratorConfig,
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let Some(request_lib) = args.request_lib {
        config.request_lib = request_lib;
    }
    if let Some(mock_type) = args.mock_type {
        config.mock_type = mock_type;
    }

    let endpoint = EndpointDescriptor::from_json(&read_input(&args.input)?)?;
    let workflow = Workflow::new(WorkflowOptions {
        config: config.clone(),
        generate_types: !args.no_types,
        generate_mock: !args.no_mock,
        generate_api: !args.no_api,
    });
    let report = workflow.run_with(&endpoint, &mut synthesizer(args.seed));

    let saved = match &args.out_dir {
        Some(root) => save_artifacts(root, &config, args.filename.as_deref(), &report.artifacts())?,
        None => Vec::new(),
    };

    if json {
        let response = ToolResponse::ok("workflow finished", &report);
        println!("{}", response.to_json()?);
    } else if saved.is_empty() {
        let sections: Vec<String> = report
            .artifacts()
            .into_iter()
            .map(|artifact| artifact.source_text)
            .collect();
        println!("{}", sections.join("\n\n"));
    } else {
        for path in &saved {
            println!("{}", path.display());
        }
    }

    for error in &report.errors {
        eprintln!("error: {}", error);
    }

    Ok(if report.errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn synthesizer(seed: Option<u64>) -> MockSynthesizer<rand::rngs::StdRng> {
    match seed {
        Some(seed) => MockSynthesizer::from_seed(seed),
        None => MockSynthesizer::from_entropy(),
    }
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
    }
}

/// Print either the bare artifact or the JSON envelope.
fn emit<T: Serialize>(
    json: bool,
    action: &str,
    result: yapi_codegen::Result<T>,
    render: impl Fn(&T) -> String,
    output: Option<&Path>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (text, success) = if json {
        let response = ToolResponse::from_result(action, result);
        (response.to_json()?, response.success)
    } else {
        (render(&result?), true)
    };

    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{}", text),
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
