use clap::{Parser, Subcommand, ValueEnum};
use penn_playground::{render_json, render_summary, resolve_parameters};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vegetation_penn::{GroveBuilder, PointsByLevel, Tree, TreeParameters};

#[derive(Parser)]
#[command(author, version, about = "Grows Weber-Penn tree skeletons and prints their line segments")]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Grow a single tree
	Generate {
		#[command(flatten)]
		source: Source,
	},

	/// Grow a grove of trees on a noisy grid
	Grove {
		#[command(flatten)]
		source: Source,

		/// Grid cells per side
		#[arg(long, default_value_t = 4)]
		count: usize,

		/// Spacing between grid cells
		#[arg(long, default_value_t = 20.0)]
		step: f32,

		/// Placement noise threshold on [0, 1]; higher keeps fewer trees
		#[arg(long, default_value_t = 0.5)]
		threshold: f32,
	},

	/// Print a preset as TOML
	Preset {
		#[arg(default_value = "aspen")]
		name: String,
	},
}

#[derive(clap::Args)]
struct Source {
	/// Parameter file (.toml or .json)
	#[arg(long)]
	params: Option<PathBuf>,

	/// Preset used when no parameter file is given
	#[arg(long, default_value = "aspen")]
	preset: String,

	#[arg(long, default_value_t = 12345)]
	seed: u64,

	#[arg(long, value_enum, default_value_t = Format::Summary)]
	format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
	Json,
	Summary,
}

impl Source {
	fn parameters(&self) -> anyhow::Result<TreeParameters> {
		resolve_parameters(self.params.as_deref(), &self.preset)
	}

	fn print(&self, points: &PointsByLevel) -> anyhow::Result<()> {
		match self.format {
			Format::Json => println!("{}", render_json(points)?),
			Format::Summary => println!("{}", render_summary(points)),
		}
		Ok(())
	}
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	match Cli::parse().command {
		Command::Generate { source } => {
			let tree = Tree::generate(source.parameters()?, source.seed)?;
			source.print(&tree.points_by_level())?;
		}
		Command::Grove { source, count, step, threshold } => {
			let grove = GroveBuilder::new(source.parameters()?)
				.with_seed(source.seed)
				.with_count(count)
				.with_step_size(step)
				.with_threshold(threshold)
				.build()?;
			source.print(&grove.points_by_level())?;
		}
		Command::Preset { name } => {
			let params = TreeParameters::preset(&name)
				.ok_or_else(|| anyhow::anyhow!("unknown preset {name:?}"))?;
			print!("{}", params.to_toml_string()?);
		}
	}

	Ok(())
}
