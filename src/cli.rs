//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_ROOT;
use crate::datasets::Dataset;

#[derive(Parser, Debug)]
#[command(name = "celeba-fetch", version, about = "Download datasets for DCGAN training.")]
pub struct Args {
    /// Name of dataset to download
    #[arg(value_name = "N", value_enum, required = true, num_args = 1..)]
    pub datasets: Vec<Dataset>,

    /// Directory the dataset layout is created in
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn accepts_repeated_dataset_names() {
        let args = Args::try_parse_from(["celeba-fetch", "celebA", "mnist", "celebA"]).unwrap();
        assert_eq!(
            args.datasets,
            vec![Dataset::CelebA, Dataset::Mnist, Dataset::CelebA]
        );
        assert_eq!(args.root, PathBuf::from(DEFAULT_ROOT));
    }

    #[test]
    fn dataset_names_are_case_sensitive() {
        let err = Args::try_parse_from(["celeba-fetch", "CelebA"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn at_least_one_dataset_is_required() {
        let err = Args::try_parse_from(["celeba-fetch"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn root_can_be_overridden() {
        let args = Args::try_parse_from(["celeba-fetch", "--root", "/tmp/celeba", "lsun"]).unwrap();
        assert_eq!(args.root, PathBuf::from("/tmp/celeba"));
        assert_eq!(args.datasets, vec![Dataset::Lsun]);
    }
}
