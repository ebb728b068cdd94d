/// Tunables for the aggregations behind `/stats`.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Number of equal-width rating bins over [0, 10]
    pub bin_count: usize,

    /// How many genres make it into the frequency table
    pub top_genres: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            bin_count: 10,
            top_genres: 8,
        }
    }
}
