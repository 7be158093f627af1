//! `topword profiles`: profile discovery.

use anyhow::Result;

use topword_core::{list_available_profiles, profile_candidate_paths};

use crate::cli::ProfilesCommand;
use crate::commands::Console;

pub fn run_profiles(cmd: &ProfilesCommand, console: &Console) -> Result<()> {
    match cmd {
        ProfilesCommand::List => {
            let profiles = list_available_profiles();
            if profiles.is_empty() {
                console.info("No profiles found. Searched:");
                for path in profile_candidate_paths("<name>") {
                    console.info(format!("  {}", path.display()));
                }
                return Ok(());
            }
            for profile in profiles {
                let location = profile
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                match &profile.description {
                    Some(desc) => println!("{}\t{}\t{}", profile.profile_name, desc, location),
                    None => println!("{}\t\t{}", profile.profile_name, location),
                }
            }
        }
    }
    Ok(())
}
