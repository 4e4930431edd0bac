//! CLI value enums and domain type conversions.

use clap::ValueEnum;

use crate::domain::Dataset;

/// Built-in dataset for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetArg {
    /// E-commerce platform (25 agents)
    Ecommerce,
    /// AI content pipeline (18 agents)
    Content,
}

impl std::fmt::Display for DatasetArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Dataset::from(*self))
    }
}

impl From<DatasetArg> for Dataset {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Ecommerce => Dataset::Ecommerce,
            DatasetArg::Content => Dataset::Content,
        }
    }
}

impl From<Dataset> for DatasetArg {
    fn from(dataset: Dataset) -> Self {
        match dataset {
            Dataset::Ecommerce => DatasetArg::Ecommerce,
            Dataset::Content => DatasetArg::Content,
        }
    }
}
