use serde::{Deserialize, Serialize};

/// A dense embedding vector.
///
/// Components are stored as `f32` (what embedding APIs return); all
/// similarity math accumulates in `f64` so scores stay comparable even
/// for high-dimensional vectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Compute cosine similarity with another vector.
    ///
    /// Defined as `dot(a,b) / (|a| * |b|)`, in `[-1, 1]`. A zero vector
    /// on either side yields `0.0`, never NaN. Dimension agreement is
    /// the caller's invariant (the store enforces it at insertion).
    pub fn cosine_similarity(&self, other: &Vector) -> f64 {
        let mut dot = 0.0f64;
        let mut norm_a = 0.0f64;
        let mut norm_b = 0.0f64;
        for (a, b) in self.data.iter().zip(other.data.iter()) {
            dot += f64::from(*a) * f64::from(*b);
            norm_a += f64::from(*a) * f64::from(*a);
            norm_b += f64::from(*b) * f64::from(*b);
        }

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a.sqrt() * norm_b.sqrt())
    }

    /// Normalize the vector to unit length in place.
    pub fn normalize(&mut self) {
        let norm = self
            .data
            .iter()
            .map(|x| f64::from(*x) * f64::from(*x))
            .sum::<f64>()
            .sqrt();
        if norm > f64::from(f32::EPSILON) {
            let inv_norm = (1.0 / norm) as f32;
            for x in &mut self.data {
                *x *= inv_norm;
            }
        }
    }

    /// Get normalized copy.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut v = self.clone();
        v.normalize();
        v
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Vector::new(data)
    }
}
