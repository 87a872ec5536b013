//! Solver and batch configuration.

/// Options of the constraint search.
///
/// # Examples
///
/// ```
/// use vrptw_csp::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_max_vehicles(5)
///     .with_forward_checking(false);
/// assert_eq!(config.max_vehicles, Some(5));
/// assert!(config.arc_consistency);
/// assert!(!config.forward_checking);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Largest vehicle cap to try; the fleet size is always an upper bound.
    pub max_vehicles: Option<usize>,
    /// Run the arc consistency sweep before each vehicle cap.
    pub arc_consistency: bool,
    /// Prune domains after every commitment.
    pub forward_checking: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_vehicles: None,
            arc_consistency: true,
            forward_checking: true,
        }
    }
}

impl SolverConfig {
    pub fn with_max_vehicles(mut self, max_vehicles: usize) -> Self {
        self.max_vehicles = Some(max_vehicles);
        self
    }

    pub fn with_arc_consistency(mut self, enabled: bool) -> Self {
        self.arc_consistency = enabled;
        self
    }

    pub fn with_forward_checking(mut self, enabled: bool) -> Self {
        self.forward_checking = enabled;
        self
    }
}

/// Options of a directory run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Extension of instance files, without the dot.
    pub extension: String,
    /// Keep only the first N records (depot included) of every instance;
    /// zero keeps them all.
    pub max_customers: Option<usize>,
    pub solver: SolverConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            max_customers: None,
            solver: SolverConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_max_customers(mut self, max_customers: usize) -> Self {
        self.max_customers = Some(max_customers);
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}
