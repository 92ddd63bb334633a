//! Combinatorial problems encoded for the continuous engines.
//!
//! - [`Tsp`]: random-key encoding. The tour visits cities in ascending
//!   order of their keys and returns to the start.
//! - [`Knapsack`]: one gene per item, selected when the gene exceeds
//!   [`SELECTION_THRESHOLD`]. Over-capacity selections are penalised.
//! - [`Scheduling`]: random-key job order, list-scheduled onto the
//!   least-loaded machine. The cost is the makespan.
//!
//! All three build minimization problems over `[0, 1]` genes.

use crate::error::ValidationError;
use crate::problem::Problem;
use std::sync::Arc;

/// Genes above this value select their item.
pub const SELECTION_THRESHOLD: f64 = 0.5;

/// Default cost per unit of weight above capacity.
pub const DEFAULT_PENALTY_FACTOR: f64 = 1000.0;

/// Indices of `keys` in ascending key order.
///
/// Ties keep index order.
pub fn rank_keys(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    order
}

/// Travelling salesman instance over planar coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tsp {
    cities: Vec<(f64, f64)>,
}

/// A decoded tour.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub order: Vec<usize>,
    pub length: f64,
}

impl Tsp {
    pub fn new(cities: Vec<(f64, f64)>) -> Result<Self, ValidationError> {
        if cities.len() < 2 {
            return Err(ValidationError::out_of_range("cities", cities.len(), ">= 2"));
        }
        if let Some(&(x, y)) = cities.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(ValidationError::out_of_range(
                "cities",
                format!("({x}, {y})"),
                "finite coordinates",
            ));
        }
        Ok(Self { cities })
    }

    pub fn cities(&self) -> &[(f64, f64)] {
        &self.cities
    }

    /// Length of the closed tour visiting cities in `order`.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        let n = order.len();
        (0..n)
            .map(|i| {
                let (ax, ay) = self.cities[order[i]];
                let (bx, by) = self.cities[order[(i + 1) % n]];
                (ax - bx).hypot(ay - by)
            })
            .sum()
    }

    pub fn decode(&self, keys: &[f64]) -> Route {
        let order = rank_keys(keys);
        let length = self.tour_length(&order);
        Route { order, length }
    }

    /// Minimize tour length over one `[0, 1]` key per city.
    pub fn problem(&self) -> Result<Problem, ValidationError> {
        let tsp = Arc::new(self.clone());
        Problem::builder(self.cities.len())
            .uniform_bounds(0.0, 1.0)
            .minimize()
            .fitness(move |keys| tsp.tour_length(&rank_keys(keys)))
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    pub weight: f64,
    pub value: f64,
}

/// 0/1 knapsack instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Knapsack {
    items: Vec<Item>,
    capacity: f64,
    penalty_factor: f64,
}

/// A decoded selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub items: Vec<usize>,
    pub total_weight: f64,
    pub total_value: f64,
    pub within_capacity: bool,
    /// `total_weight / capacity · 100`.
    pub utilization_percent: f64,
}

impl Knapsack {
    pub fn new(items: Vec<Item>, capacity: f64) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::out_of_range("items", 0, ">= 1"));
        }
        if !(capacity.is_finite() && capacity > 0.0) {
            return Err(ValidationError::out_of_range("capacity", capacity, "> 0"));
        }
        for item in &items {
            if !(item.weight.is_finite() && item.weight >= 0.0) {
                return Err(ValidationError::out_of_range("weight", item.weight, ">= 0"));
            }
            if !item.value.is_finite() {
                return Err(ValidationError::out_of_range(
                    "value",
                    item.value,
                    "a finite number",
                ));
            }
        }
        Ok(Self {
            items,
            capacity,
            penalty_factor: DEFAULT_PENALTY_FACTOR,
        })
    }

    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    fn selected(genes: &[f64]) -> impl Iterator<Item = usize> + '_ {
        genes
            .iter()
            .enumerate()
            .filter(|&(_, &g)| g > SELECTION_THRESHOLD)
            .map(|(i, _)| i)
    }

    fn totals(&self, genes: &[f64]) -> (f64, f64) {
        Self::selected(genes)
            .filter_map(|i| self.items.get(i))
            .fold((0.0, 0.0), |(w, v), item| (w + item.weight, v + item.value))
    }

    /// `-value` when within capacity, else `penalty_factor · overflow`.
    pub fn cost(&self, genes: &[f64]) -> f64 {
        let (weight, value) = self.totals(genes);
        if weight > self.capacity {
            self.penalty_factor * (weight - self.capacity)
        } else {
            -value
        }
    }

    pub fn decode(&self, genes: &[f64]) -> Selection {
        let items: Vec<usize> = Self::selected(genes)
            .filter(|&i| i < self.items.len())
            .collect();
        let (total_weight, total_value) = self.totals(genes);
        Selection {
            items,
            total_weight,
            total_value,
            within_capacity: total_weight <= self.capacity,
            utilization_percent: total_weight / self.capacity * 100.0,
        }
    }

    /// Minimize [`cost`](Self::cost) over one `[0, 1]` gene per item.
    pub fn problem(&self) -> Result<Problem, ValidationError> {
        let knapsack = Arc::new(self.clone());
        Problem::builder(self.items.len())
            .uniform_bounds(0.0, 1.0)
            .minimize()
            .fitness(move |genes| knapsack.cost(genes))
            .build()
    }
}

/// Identical machines processing independent jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduling {
    processing_times: Vec<f64>,
    machines: usize,
}

/// A decoded schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Jobs in dispatch order.
    pub order: Vec<usize>,
    /// Jobs per machine, in the order each machine runs them.
    pub assignments: Vec<Vec<usize>>,
    pub loads: Vec<f64>,
    pub makespan: f64,
}

impl Scheduling {
    pub fn new(processing_times: Vec<f64>, machines: usize) -> Result<Self, ValidationError> {
        if processing_times.is_empty() {
            return Err(ValidationError::out_of_range("processing_times", 0, ">= 1 job"));
        }
        if machines == 0 {
            return Err(ValidationError::out_of_range("machines", machines, ">= 1"));
        }
        if let Some(&time) = processing_times
            .iter()
            .find(|t| !(t.is_finite() && **t >= 0.0))
        {
            return Err(ValidationError::out_of_range(
                "processing_times",
                time,
                "finite and >= 0",
            ));
        }
        Ok(Self {
            processing_times,
            machines,
        })
    }

    pub fn processing_times(&self) -> &[f64] {
        &self.processing_times
    }

    pub fn machines(&self) -> usize {
        self.machines
    }

    /// Machine loads after dispatching `order`, each job to the least-loaded
    /// machine (lowest index on ties).
    fn dispatch(&self, order: &[usize]) -> (Vec<Vec<usize>>, Vec<f64>) {
        let mut assignments = vec![Vec::new(); self.machines];
        let mut loads = vec![0.0; self.machines];
        for &job in order {
            let machine = loads
                .iter()
                .enumerate()
                .fold(0, |min, (m, &load)| if load < loads[min] { m } else { min });
            loads[machine] += self.processing_times[job];
            assignments[machine].push(job);
        }
        (assignments, loads)
    }

    /// Makespan of the schedule encoded by `keys`.
    pub fn makespan(&self, keys: &[f64]) -> f64 {
        let (_, loads) = self.dispatch(&rank_keys(keys));
        loads.into_iter().fold(0.0, f64::max)
    }

    pub fn decode(&self, keys: &[f64]) -> Schedule {
        let order = rank_keys(keys);
        let (assignments, loads) = self.dispatch(&order);
        let makespan = loads.iter().copied().fold(0.0, f64::max);
        Schedule {
            order,
            assignments,
            loads,
            makespan,
        }
    }

    /// Minimize the makespan over one `[0, 1]` key per job.
    pub fn problem(&self) -> Result<Problem, ValidationError> {
        let scheduling = Arc::new(self.clone());
        Problem::builder(self.processing_times.len())
            .uniform_bounds(0.0, 1.0)
            .minimize()
            .fitness(move |keys| scheduling.makespan(keys))
            .build()
    }
}
