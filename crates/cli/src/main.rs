mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use applebuild_lib::compiler::CompilerOverrides;
use applebuild_lib::consts::{
  APP_NAME, DEFAULT_CMAKE, DEFAULT_GENERATOR, DEFAULT_MAKE_PROGRAM, DEFAULT_PACKAGE_ROOT, DEFAULT_XCODE_PATH,
};
use applebuild_lib::execute::{BuildRequest, LibraryTarget, PipelineError};
use applebuild_lib::platform::{Configuration, Platform};
use applebuild_lib::toolchain::Toolchain;

use output::OutputFormat;

/// Build msquic as a static library for Apple platforms.
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the cmake executable (bare names are looked up on PATH)
  #[arg(long, default_value = DEFAULT_CMAKE)]
  cmake: PathBuf,

  /// Root of the source tree passed to `cmake -S`
  #[arg(long, default_value = DEFAULT_PACKAGE_ROOT)]
  package_root: PathBuf,

  /// CMake build directory
  #[arg(long)]
  build_dir: PathBuf,

  /// Install destination
  #[arg(long)]
  dist_dir: PathBuf,

  /// Build configuration: Debug or Release
  #[arg(long, default_value_t = Configuration::Release)]
  configuration: Configuration,

  /// Target platform: device, simulator or desktop
  #[arg(long)]
  platform: Platform,

  /// Target architecture(s), separated by commas, semicolons or spaces
  #[arg(long)]
  arch: String,

  /// Xcode.app path used to locate default compilers and SDKs
  #[arg(long, default_value = DEFAULT_XCODE_PATH)]
  xcode_path: PathBuf,

  /// CMake generator (empty to let CMake choose)
  #[arg(long, default_value = DEFAULT_GENERATOR)]
  generator: String,

  /// CMake make program
  #[arg(long, default_value = DEFAULT_MAKE_PROGRAM)]
  make_program: String,

  /// C compiler path [fallback env: MSQUIC_C_COMPILER]
  #[arg(long, default_value = "")]
  cc: String,

  /// C++ compiler path [fallback env: MSQUIC_CXX_COMPILER]
  #[arg(long, default_value = "")]
  cxx: String,

  /// Enable msquic logging with the given backend (e.g. stdout)
  #[arg(long)]
  logging_type: Option<String>,

  /// Print the cmake invocations without running them
  #[arg(long)]
  dry_run: bool,

  /// Output format for --dry-run
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  output: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn request(&self) -> BuildRequest {
    let non_empty = |value: &str| (!value.is_empty()).then(|| PathBuf::from(value));

    BuildRequest {
      cmake: self.cmake.clone(),
      package_root: self.package_root.clone(),
      build_dir: self.build_dir.clone(),
      dist_dir: self.dist_dir.clone(),
      configuration: self.configuration,
      platform: self.platform,
      arch_spec: self.arch.clone(),
      toolchain: Toolchain::new(&self.xcode_path),
      generator: Some(self.generator.clone()),
      make_program: Some(self.make_program.clone()),
      compilers: CompilerOverrides::from_env(non_empty(&self.cc), non_empty(&self.cxx)),
      logging_type: self.logging_type.clone(),
      target: LibraryTarget::default(),
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "error" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match run(&cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      output::print_error(&err);
      ExitCode::from(exit_code(&err))
    }
  }
}

fn run(cli: &Cli) -> Result<()> {
  let request = cli.request();
  debug!(
    platform = %request.platform,
    configuration = %request.configuration,
    archs = %request.arch_spec,
    build_dir = %request.build_dir.display(),
    dist_dir = %request.dist_dir.display(),
    dry_run = cli.dry_run,
    "parsed request"
  );

  if cli.dry_run {
    cmd::cmd_plan(&request, cli.output)
  } else {
    cmd::cmd_build(&request)
  }
}

/// Step failures pass the child's exit status through; everything else exits 1.
fn exit_code(err: &anyhow::Error) -> u8 {
  err
    .downcast_ref::<PipelineError>()
    .map(PipelineError::exit_code)
    .and_then(|code| u8::try_from(code).ok())
    .unwrap_or(1)
}
