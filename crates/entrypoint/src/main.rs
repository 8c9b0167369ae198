use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let parsed = cli::Cli::parse();

    match parsed.dispatch() {
        Ok(()) => Ok(()),
        Err(err) => {
            // A refused license gate must fail fast with its own message,
            // never wrapped in configuration diagnostics.
            if let Some(entrypoint_error) =
                err.downcast_ref::<neo4j_entrypoint_core::errors::EntrypointError>()
            {
                if matches!(
                    entrypoint_error,
                    neo4j_entrypoint_core::errors::EntrypointError::License(_)
                ) {
                    eprintln!("{}", entrypoint_error);
                    std::process::exit(1);
                }
            }

            Err(err)
        }
    }
}
