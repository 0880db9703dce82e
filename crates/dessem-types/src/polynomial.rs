use dessem_wire::layout::{POLYNOMIAL_COEFFICIENTS, TAILRACE_COEFFICIENTS, TAILRACE_FAMILIES};

/// Evaluate `Σ c[i] · x^i` with Horner's rule. `c[0]` is the constant term.
pub fn evaluate(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// A five-coefficient polynomial as stored for volume → elevation and
/// elevation → area curves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Polynomial {
    pub coefficients: [f64; POLYNOMIAL_COEFFICIENTS],
}

impl Polynomial {
    pub fn new(coefficients: [f64; POLYNOMIAL_COEFFICIENTS]) -> Self {
        Self { coefficients }
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate(&self.coefficients, x)
    }
}

/// Tailrace (flow → downstream elevation) polynomial families.
///
/// On the wire the 36 coefficients are one flat run, family-major:
///
/// ```text
///   [f0c0 f0c1 .. f0c5][f1c0 .. f1c5] ... [f5c0 .. f5c5]
/// ```
///
/// They are held as `[[f64; 6]; 6]` in the same order, so `families[i]`
/// is family `i` and flattening restores the wire order exactly. Only the
/// first `family_count` families are in use.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TailracePolynomials {
    pub family_count: i32,
    pub families: [[f64; TAILRACE_COEFFICIENTS]; TAILRACE_FAMILIES],
}

impl TailracePolynomials {
    /// Build from the flat wire sequence of 36 coefficients.
    pub fn from_flat(
        family_count: i32,
        flat: &[f64; TAILRACE_FAMILIES * TAILRACE_COEFFICIENTS],
    ) -> Self {
        let families =
            std::array::from_fn(|f| std::array::from_fn(|c| flat[f * TAILRACE_COEFFICIENTS + c]));
        Self {
            family_count,
            families,
        }
    }

    /// All 36 coefficients in wire order.
    pub fn flat(&self) -> impl Iterator<Item = f64> + '_ {
        self.families.iter().flatten().copied()
    }

    /// Number of families in use, clamped to `0..=6`.
    pub fn active_len(&self) -> usize {
        usize::try_from(self.family_count)
            .unwrap_or(0)
            .min(TAILRACE_FAMILIES)
    }

    /// Coefficients of family `index`, if it is in use.
    pub fn family(&self, index: usize) -> Option<&[f64; TAILRACE_COEFFICIENTS]> {
        if index < self.active_len() {
            Some(&self.families[index])
        } else {
            None
        }
    }

    /// Iterate over the families in use.
    pub fn active_families(&self) -> impl Iterator<Item = &[f64; TAILRACE_COEFFICIENTS]> {
        self.families.iter().take(self.active_len())
    }

    /// Evaluate family `index` at `flow`.
    pub fn evaluate(&self, index: usize, flow: f64) -> Option<f64> {
        self.family(index).map(|c| evaluate(c, flow))
    }
}
