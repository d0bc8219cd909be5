use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use clap::{Args, Parser, Subcommand};
    use g3d_math::Matrix4;

    #[derive(Debug, Parser)]
    #[command(about = "Inspect 4x4 transform matrices", long_about = None)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Print the determinant of a matrix
        Determinant(MatrixArgs),
        /// Print the inverse of a matrix
        Invert(MatrixArgs),
        /// Print the translation, rotation and scale of a transform
        Decompose(MatrixArgs),
    }

    #[derive(Debug, Args)]
    struct MatrixArgs {
        /// The 16 matrix elements in column-major order
        #[arg(num_args = 16, required = true, allow_negative_numbers = true)]
        values: Vec<f32>,
    }

    impl MatrixArgs {
        fn matrix(&self) -> Result<Matrix4> {
            Ok(Matrix4::from_slice(&self.values)?)
        }
    }

    pub fn main() -> Result<()> {
        env_logger::init();

        let cli = Cli::parse();

        match cli.command {
            Command::Determinant(args) => {
                println!("{}", args.matrix()?.determinant());
            }
            Command::Invert(args) => {
                print!("{}", args.matrix()?.inverted()?);
            }
            Command::Decompose(args) => {
                let matrix = args.matrix()?;
                let translation = matrix.translation();
                let rotation = matrix.rotation_with_normalized_axes();
                let scale = matrix.scale();
                println!(
                    "translation: [{}, {}, {}]",
                    translation.x(),
                    translation.y(),
                    translation.z()
                );
                println!(
                    "rotation: [{}, {}, {}, {}]",
                    rotation.x(),
                    rotation.y(),
                    rotation.z(),
                    rotation.w()
                );
                println!("scale: [{}, {}, {}]", scale.x(), scale.y(), scale.z());
            }
        }
        Ok(())
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
