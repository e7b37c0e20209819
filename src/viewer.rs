//! Putting fetching, pruning and rendering together

use crate::{error::Error, fetch::Fetcher, prune::Pruner, render::Renderer};

/// Fetches, prunes and renders a tree
pub(crate) struct TreeViewer<'a> {
    /// Where the tree comes from
    fetcher:  Box<dyn Fetcher>,
    /// Which part of it is kept
    pruner:   Box<dyn Pruner>,
    /// How it is displayed
    renderer: Box<dyn Renderer + 'a>,
}

impl<'a> TreeViewer<'a> {
    /// Create a new [`TreeViewer`]
    pub(crate) fn new(
        fetcher: Box<dyn Fetcher>,
        pruner: Box<dyn Pruner>,
        renderer: Box<dyn Renderer + 'a>,
    ) -> Self {
        Self {
            fetcher,
            pruner,
            renderer,
        }
    }

    /// Display the current tree once
    pub(crate) fn view(&mut self) -> Result<(), Error> {
        let tree = self.fetcher.fetch()?;
        let tree = self.pruner.prune(tree)?;
        self.renderer.render(&tree)?;
        Ok(())
    }
}
