//! Print the i3 layout tree in a user friendly format

// root -> output -> content -> workspace -> con

#![warn(
    clippy::all,
    clippy::complexity,
    clippy::correctness,
    clippy::nursery,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    bad_style,
    ellipsis_inclusive_range_patterns,
    exported_private_dependencies,
    ill_formed_attribute_input,
    improper_ctypes,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_abi,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    noop_method_call,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    semicolon_in_expressions_from_macros,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unreachable_pub,
    unsafe_code,
    while_true
)]
#![allow(
    clippy::redundant_pub_crate,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::struct_excessive_bools,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::exit,
    clippy::similar_names
)]
#![cfg_attr(
    any(test),
    allow(
        clippy::expect_used,
        clippy::panic,
        clippy::unwrap_used,
        clippy::wildcard_enum_match_arm,
    )
)]

mod cli;
mod config;
mod error;
mod fetch;
mod macros;
mod prune;
mod render;
mod tree;
mod utils;
mod viewer;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Opts;
use colored::Colorize;
use config::Config;
use fetch::FetchStrategy;
use render::RenderStrategy;
use std::{io, process::exit, thread};
use viewer::TreeViewer;

fn main() {
    let args = Opts::parse();

    if let Err(e) = run(&args) {
        i3tree_error!("{:#}", e);
        exit(1);
    }
}

/// Build the viewer from the command line and display the tree
fn run(args: &Opts) -> Result<()> {
    let _logger = utils::initialize_logging(args)?;

    let config = match &args.config {
        Some(path) => Config::load_explicit(path)?,
        None => Config::load_default(),
    };
    log::trace!("{}: {:#?}", "Configuration options".bright_blue(), config);

    let fetcher = FetchStrategy::from_name(&args.from)?.fetcher();
    let pruner = prune::new_pruner(
        args.workspace
            .as_deref()
            .unwrap_or(&config.default_output_type),
    );
    let renderer = RenderStrategy::from_name(&args.render)?.renderer(io::stdout(), &config);

    let mut viewer = TreeViewer::new(fetcher, pruner, renderer);

    match args.watch_interval() {
        None => viewer.view().context("failed to display the tree")?,
        Some(interval) => {
            i3tree_info!("redrawing every {}s, press Ctrl-C to stop", interval.as_secs());
            loop {
                utils::clear_screen()?;
                viewer.view().context("failed to display the tree")?;
                thread::sleep(interval);
            }
        },
    }

    Ok(())
}
