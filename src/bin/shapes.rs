// Shapes driver: polymorphism, the factory, collection utilities and the
// ownership tour, printed as a walkthrough.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use shapes::report::{Renderer, Summary};
use shapes::tour::{self, Lesson};
use shapes::{Circle, Rectangle, Settings, ShapeCollection, ShapeFactory, ShapeKind};

#[derive(Parser, Debug)]
#[command(name = "shapes", version, about = "Shape hierarchy, factory and ownership walkthrough")]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Decimals printed for areas and perimeters
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Disable colored headings
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full demonstration
    Demo,
    /// Build shapes from descriptions like "circle 3.5" and summarize them
    Report {
        /// Descriptions; the configured shapes are used when none are given
        descriptions: Vec<String>,
    },
    /// Build one shape from a kind and its parameters
    Create {
        kind: ShapeKind,
        #[arg(allow_negative_numbers = true)]
        param1: f64,
        #[arg(default_value_t = 0.0, allow_negative_numbers = true)]
        param2: f64,
    },
    /// Walk through ownership and borrowing lessons
    Tour {
        /// Lessons to run; all of them when none are given
        lessons: Vec<Lesson>,
    },
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(precision) = cli.precision {
        settings = settings
            .with_precision(precision)
            .context("invalid --precision")?;
    }
    if cli.no_color {
        settings.color = false;
    }
    Ok(settings)
}

fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("{}", line);
    }
}

// =============================================================================
// demo
// =============================================================================

fn demonstrate_polymorphism(out: &Renderer) -> Result<()> {
    println!("\n{}", out.heading("Polymorphism demo"));

    let mut shapes = ShapeCollection::with_capacity(3);
    shapes.push(Box::new(Circle::new(5.0)?));
    shapes.push(Box::new(Rectangle::new(4.0, 6.0)?));
    shapes.push(Box::new(Rectangle::new(3.0, 3.0)?));

    for shape in shapes.present() {
        println!("{}", out.shape(shape));
    }
    Ok(())
}

fn demonstrate_factory(out: &Renderer) -> Result<()> {
    println!("\n{}", out.heading("Factory pattern demo"));

    let circle = ShapeFactory::create(ShapeKind::Circle, 7.0)?;
    let rect = ShapeFactory::create_shape(ShapeKind::Rectangle, 5.0, 10.0)?;
    let square = ShapeFactory::create(ShapeKind::Square, 4.0)?;
    for shape in [&circle, &rect, &square] {
        println!("{}", out.shape(&**shape));
    }

    let first = ShapeFactory::create_from_description("circle 3.5")
        .context("failed to parse \"circle 3.5\"")?;
    let second = ShapeFactory::create_from_description("rectangle 2.0 8.0")
        .context("failed to parse \"rectangle 2.0 8.0\"")?;

    println!("\nShapes from descriptions:");
    println!("{}", out.shape(first.as_ref()));
    println!("{}", out.shape(second.as_ref()));
    Ok(())
}

fn demonstrate_utilities(out: &Renderer, settings: &Settings) -> Result<()> {
    println!("\n{}", out.heading("Utilities demo"));

    let shapes = ShapeFactory::create_collection(&settings.shapes)
        .context("failed to build the configured shapes")?;
    print_lines(out.summary(&Summary::of(&shapes, out.precision)));
    Ok(())
}

fn demonstrate_concrete_usage(out: &Renderer) -> Result<()> {
    println!("\n{}", out.heading("Concrete type usage"));

    let c1 = Circle::new(5.0)?;
    let c2 = Circle::new(5.0)?;
    let c3 = Circle::new(7.0)?;

    println!("Circle radius: {}", c1.radius());
    println!(
        "{}",
        out.value("Area of radius 10 without a circle", Circle::area_for_radius(10.0))
    );
    if c1 == c2 {
        println!("c1 and c2 are equal");
    }
    if c1 != c3 {
        println!("c1 and c3 are not equal");
    }

    let r1 = Rectangle::new(5.0, 5.0)?;
    println!("Rectangle is square? {}", if r1.is_square() { "Yes" } else { "No" });
    Ok(())
}

fn demonstrate_errors(out: &Renderer) {
    println!("\n{}", out.heading("Error handling"));

    match Circle::new(-5.0) {
        Ok(circle) => println!("{}", out.shape(&circle)),
        Err(err) => {
            warn!("recovered from construction failure: {}", err);
            println!("{}", out.error(&err.to_string()));
        }
    }
}

fn run_demo(out: &Renderer, settings: &Settings) -> Result<()> {
    println!("{}", out.heading("Shapes walkthrough"));

    demonstrate_polymorphism(out)?;
    demonstrate_factory(out)?;
    demonstrate_utilities(out, settings)?;
    demonstrate_concrete_usage(out)?;
    demonstrate_errors(out);

    println!("\n{}", out.heading("Demo complete"));
    Ok(())
}

// =============================================================================
// other commands
// =============================================================================

fn run_report(out: &Renderer, settings: &Settings, descriptions: &[String]) -> Result<()> {
    let descriptions: &[String] = if descriptions.is_empty() {
        &settings.shapes
    } else {
        descriptions
    };
    info!("building {} shapes", descriptions.len());

    let mut shapes = ShapeCollection::with_capacity(descriptions.len());
    for text in descriptions {
        let shape = ShapeFactory::create_from_description(text)
            .with_context(|| format!("invalid shape description {:?}", text))?;
        println!("{}", out.shape(shape.as_ref()));
        shapes.push(shape);
    }

    println!("\n{}", out.heading("Summary"));
    print_lines(out.summary(&Summary::of(&shapes, out.precision)));
    Ok(())
}

fn run_create(out: &Renderer, kind: ShapeKind, param1: f64, param2: f64) -> Result<()> {
    let shape = ShapeFactory::create_shape(kind, param1, param2)
        .with_context(|| format!("failed to create {} from {} and {}", kind, param1, param2))?;
    println!("{}", out.shape(shape.as_ref()));
    Ok(())
}

fn run_tour(out: &Renderer, lessons: &[Lesson]) {
    println!("{}", out.heading("Ownership tour"));
    print_lines(tour::run(lessons).lines());
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(&cli)?;
    let out = Renderer::new(settings.precision, settings.color);

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&out, &settings),
        Command::Report { descriptions } => run_report(&out, &settings, &descriptions),
        Command::Create {
            kind,
            param1,
            param2,
        } => run_create(&out, kind, param1, param2),
        Command::Tour { lessons } => {
            run_tour(&out, &lessons);
            Ok(())
        }
    }
}

fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    exit_code(run(Cli::parse()))
}
