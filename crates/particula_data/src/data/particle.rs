use serde::{Deserialize, Serialize};

/// Display colour of a particle type. Irrelevant to the physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs the colour as `0xRRGGBB`.
    #[must_use]
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[must_use]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }
}

/// One particle, as seen by renderers and tests.
///
/// Storage inside the kernel is columnar (see [`ParticleSet`]); this struct is the
/// row view used at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Type index into the interaction table.
    pub kind: u32,
    pub color: Rgb,
}

impl Particle {
    /// A particle at rest.
    #[must_use]
    pub const fn at(x: f64, y: f64, kind: u32, color: Rgb) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            kind,
            color,
        }
    }

    #[inline]
    #[must_use]
    pub fn speed_sq(&self) -> f64 {
        self.vx * self.vx + self.vy * self.vy
    }
}

/// Structure-of-arrays particle storage.
///
/// All columns always have the same length. Particles are addressed by index and
/// the count only changes when a whole set is replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub kind: Vec<u32>,
    pub color: Vec<Rgb>,
}

impl ParticleSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            vx: Vec::with_capacity(capacity),
            vy: Vec::with_capacity(capacity),
            kind: Vec::with_capacity(capacity),
            color: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, p: Particle) {
        self.x.push(p.x);
        self.y.push(p.y);
        self.vx.push(p.vx);
        self.vy.push(p.vy);
        self.kind.push(p.kind);
        self.color.push(p.color);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Particle> {
        (index < self.len()).then(|| self.row(index))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Particle> + '_ {
        (0..self.len()).map(move |i| self.row(i))
    }

    fn row(&self, index: usize) -> Particle {
        Particle {
            x: self.x[index],
            y: self.y[index],
            vx: self.vx[index],
            vy: self.vy[index],
            kind: self.kind[index],
            color: self.color[index],
        }
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<Particle> {
        self.iter().collect()
    }

    /// Total kinetic energy assuming unit mass.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        self.vx
            .iter()
            .zip(&self.vy)
            .map(|(vx, vy)| 0.5 * (vx * vx + vy * vy))
            .sum()
    }
}

impl FromIterator<Particle> for ParticleSet {
    fn from_iter<I: IntoIterator<Item = Particle>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for p in iter {
            set.push(p);
        }
        set
    }
}
