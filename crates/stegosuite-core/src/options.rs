use crate::position::HenonParams;

/// Tunables of all methods, the defaults are what hidden data is expected to
/// be unveiled with.
#[derive(Debug, Clone, Default)]
pub struct CodecOptions {
    pub edge_search: EdgeSearchOptions,
    pub block_search: BlockSearchOptions,
    /// Chaotic scan parameters, there is no side artifact for them
    pub henon: HenonParams,
}

/// Descending threshold search of the edge based method.
///
/// Thresholds are given in percent of 255, the search starts at `start_percent`
/// and goes down by `step_percent` until `min_percent`, but it tries at most
/// `max_iterations` thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSearchOptions {
    pub start_percent: u32,
    pub min_percent: u32,
    pub step_percent: u32,
    pub max_iterations: usize,
}

impl Default for EdgeSearchOptions {
    fn default() -> Self {
        Self {
            start_percent: 100,
            min_percent: 1,
            step_percent: 1,
            max_iterations: 100,
        }
    }
}

impl EdgeSearchOptions {
    /// the thresholds the search visits, highest first
    pub fn percents(&self) -> impl Iterator<Item = u32> {
        let step = self.step_percent.max(1) as usize;
        (self.min_percent.max(1)..=self.start_percent)
            .rev()
            .step_by(step)
            .take(self.max_iterations)
    }
}

/// Candidate block sizes of the histogram shifting method, largest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSearchOptions {
    pub largest: u32,
    /// exclusive lower bound
    pub smallest: u32,
    pub step: u32,
}

impl Default for BlockSearchOptions {
    fn default() -> Self {
        Self {
            largest: 1000,
            smallest: 20,
            step: 25,
        }
    }
}

impl BlockSearchOptions {
    pub fn block_sizes(&self) -> Vec<u32> {
        let step = self.step.max(1) as usize;
        (self.smallest + 1..=self.largest)
            .rev()
            .step_by(step)
            .collect()
    }
}
