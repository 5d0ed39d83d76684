use clap::{Parser, Subcommand};
use sitesmith::imagegen::{self, ImagenClient, RunOptions, ThreadSleeper};
use sitesmith::scaffold::{self, ScaffoldError, ScaffoldInput};
use sitesmith::{config, content::ContentStore, generate, logging, output, routes};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitesmith")]
#[command(about = "Static marketing-site generator for local service businesses")]
#[command(long_about = "\
Static marketing-site generator for local service businesses

One content.json describes the business. sitesmith renders it into a small
SEO-oriented site: home, about, contact and gallery pages, one landing page
per service and per service area, schema.org JSON-LD, sitemap and robots.

Project structure:

  my-salon/
  ├── config.toml                  # Optional, overrides stock defaults
  ├── content.json                 # Business, services, areas, testimonials...
  └── public/                      # Copied verbatim into the output
      └── images/
          ├── hero/salon-hero.jpg
          └── services/...

Typical workflow:

  sitesmith scaffold \"Bright Cuts\" \"Hair Styling\" \"Newtown\"
  sitesmith images                 # needs GOOGLE_API_KEY or NANOBANA_API_KEY
  sitesmith build

Run 'sitesmith gen-config' to generate a documented config.toml.")]
#[command(version = sitesmith::version_string())]
struct Cli {
    /// Project directory (holds content.json, public/ and config.toml)
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    /// Output directory for the built site
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Load and validate content.json, then print an inventory
    Check,
    /// Print every route with its output file and URL
    Routes,
    /// Generate a content.json for a new business
    Scaffold {
        /// Business name, e.g. "Bright Cuts"
        business_name: Option<String>,
        /// Primary service, e.g. "Hair Styling"
        service: Option<String>,
        /// Primary location, e.g. "Newtown"
        location: Option<String>,
        /// Contact phone
        phone: Option<String>,
        /// Contact email (derived from the business name when omitted)
        email: Option<String>,
    },
    /// Generate missing images with the text-to-image API
    Images {
        /// JSON manifest of images to generate (defaults to the built-in set)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.project)?;
            println!("==> Building {}", cli.project.display());
            let report = generate::build(&cli.project, &cli.output, &site_config)?;
            output::print_build_output(&report);
            println!("==> Site written to {}", report.output_dir.display());
        }
        Command::Check => {
            let site_config = config::load_config(&cli.project)?;
            let path = cli.project.join(&site_config.content_file);
            println!("==> Checking {}", path.display());
            let store = ContentStore::load(&path)?;
            output::print_check_output(&store);
            println!("==> Content is valid");
        }
        Command::Routes => {
            let site_config = config::load_config(&cli.project)?;
            let store = ContentStore::load(&cli.project.join(&site_config.content_file))?;
            let base = routes::base_url(&store, &site_config);
            output::print_routes(&routes::all(&store), &base);
        }
        Command::Scaffold {
            business_name,
            service,
            location,
            phone,
            email,
        } => {
            let input =
                match ScaffoldInput::from_args(business_name, service, location, phone, email) {
                    Ok(input) => input,
                    Err(e @ ScaffoldError::MissingArgument(_)) => {
                        eprintln!("Error: {e}");
                        eprintln!("{}", scaffold::USAGE);
                        std::process::exit(1);
                    }
                    Err(e) => return Err(e.into()),
                };
            let site_config = config::load_config(&cli.project)?;
            std::fs::create_dir_all(&cli.project)?;
            let path = scaffold::scaffold(
                &cli.project,
                &site_config,
                &input,
                scaffold::current_year(),
            )?;
            output::print_scaffold_summary(&input, &path);
        }
        Command::Images { manifest } => {
            let api_key = match imagegen::api_key_from_env() {
                Ok(key) => key,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            let site_config = config::load_config(&cli.project)?;
            let entries = match &manifest {
                Some(path) => imagegen::load_manifest(path)?,
                None => imagegen::default_manifest(),
            };
            let out_dir = cli.project.join(&site_config.images.output_dir);
            let client = ImagenClient::new(&site_config.images, api_key)?;
            let options = RunOptions::from(&site_config.images);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_image_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let summary = imagegen::run(
                &entries,
                &out_dir,
                &client,
                &ThreadSleeper,
                &options,
                Some(tx),
            );
            printer.join().map_err(|_| "output thread panicked")?;
            output::print_image_summary(&summary);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
