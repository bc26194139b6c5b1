use clap::{Parser, Subcommand, ValueEnum};
use stegosuite_core::{CodecOptions, Method};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Experimental: how many edge thresholds the edge method tries at most
    #[arg(long = "x-edge-max-iterations", default_value = "100", global = true)]
    pub edge_max_iterations: usize,

    #[command(subcommand)]
    pub command: Commands,
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        let mut options = CodecOptions::default();
        options.edge_search.max_iterations = self.edge_max_iterations;
        options
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Hide(hide::HideArgs),
    Unveil(unveil::UnveilArgs),
    Capacity(capacity::CapacityArgs),
}

/// The hiding method, unveiling needs the same one as hiding
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodArg {
    /// one bit in the low bit of red, green and blue
    #[default]
    StandardLsb,
    /// 2 bits in red, 2 in green and 4 in blue
    BlueLsb,
    /// encrypted, key routed between green and blue, writes a key file
    ImprovedLsb,
    /// green low bit of the red channel edges, writes an edge count file
    EdgeLsb,
    /// blue low bit along a Hénon map orbit
    ChaoticLsb,
    /// difference of two higher red bits
    MsbDifference,
    /// reversible histogram shifting on gray, writes a metadata file
    Rdh,
}

impl From<MethodArg> for Method {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::StandardLsb => Method::StandardLsb,
            MethodArg::BlueLsb => Method::BlueLsb,
            MethodArg::ImprovedLsb => Method::ImprovedLsb,
            MethodArg::EdgeLsb => Method::EdgeLsb,
            MethodArg::ChaoticLsb => Method::ChaoticLsb,
            MethodArg::MsbDifference => Method::MsbDifference,
            MethodArg::Rdh => Method::Rdh,
        }
    }
}
