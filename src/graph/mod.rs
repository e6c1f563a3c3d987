//! Connectivity of the two supported network topologies, a linear chain and a
//! fully connected mean field graph, given as directed edges over neuron indices.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use crate::error::NetworkError;
use crate::neuron::normalize_name;


/// Directed connection between two neurons given as `(presynaptic, postsynaptic)` indices
pub type Edge = (usize, usize);

/// Network topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Chain where neuron `i - 1` drives neuron `i`
    Linear,
    /// Complete graph, every ordered pair of distinct neurons is connected
    MeanField,
}

impl Topology {
    /// Every topology
    pub const ALL: [Topology; 2] = [Topology::Linear, Topology::MeanField];

    /// Number of connections in a network of `n` neurons
    pub fn connection_count(&self, n: usize) -> usize {
        match self {
            Topology::Linear => n.saturating_sub(1),
            Topology::MeanField => n * n.saturating_sub(1),
        }
    }

    /// Generates the directed edges of a network of `n` neurons, for the linear
    /// chain the edges are `(i - 1, i)` for `i` in `1..n`, for the mean field
    /// graph every `(i, j)` with `i != j` ordered by presynaptic index first
    pub fn connections(&self, n: usize) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.connection_count(n));
        match self {
            Topology::Linear => edges.extend((1..n).map(|i| (i - 1, i))),
            Topology::MeanField => edges.extend(
                (0..n).flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            ),
        }

        edges
    }
}

impl Display for Topology {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            Topology::Linear => "Linear",
            Topology::MeanField => "MeanField",
        };

        write!(f, "{}", name)
    }
}

impl FromStr for Topology {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "linear" | "chain" => Ok(Topology::Linear),
            "meanfield" | "complete" => Ok(Topology::MeanField),
            _ => Err(NetworkError::UnrecognizedTopology(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_edges() {
        assert_eq!(Topology::Linear.connections(4), vec![(0, 1), (1, 2), (2, 3)]);
        assert!(Topology::Linear.connections(1).is_empty());
        assert_eq!(Topology::Linear.connection_count(4), 3);
    }

    #[test]
    fn test_mean_field_edges() {
        let edges = Topology::MeanField.connections(3);

        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
        assert_eq!(Topology::MeanField.connection_count(5), 20);
        assert_eq!(Topology::MeanField.connections(5).len(), 20);
    }

    #[test]
    fn test_topology_names() {
        assert_eq!("mean_field".parse::<Topology>(), Ok(Topology::MeanField));
        assert_eq!("Linear".parse::<Topology>(), Ok(Topology::Linear));
        assert_eq!(
            "ring".parse::<Topology>(),
            Err(NetworkError::UnrecognizedTopology(String::from("ring")))
        );

        for topology in Topology::ALL {
            assert_eq!(topology.to_string().parse::<Topology>(), Ok(topology));
        }
    }
}
