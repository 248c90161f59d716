//! Collection of fixtures and batch rendering of all their variants.
use crate::{Canvas, FixtureSpec, Shape, SpecError, Variant, render};
use std::{collections::HashSet, fmt};

/// Built-in grow lamp fixtures
const LAMPS: &[FixtureSpec] = &[
    FixtureSpec::builtin(
        "SGL_IncandLamp",
        Shape::Circle { radius: 26 },
        [60, 60, 60],
        [255, 210, 100],
        "Incandescent",
    ),
    FixtureSpec::builtin(
        "SGL_HalogenLamp",
        Shape::Circle { radius: 26 },
        [160, 160, 160],
        [255, 240, 180],
        "Halogen",
    ),
    FixtureSpec::builtin(
        "SGL_SodiumLamp",
        Shape::Oval {
            width: 52,
            height: 38,
        },
        [25, 20, 15],
        [255, 140, 30],
        "Sodium",
    ),
    FixtureSpec::builtin(
        "SGL_LEDLampMkI",
        Shape::Square { size: 48 },
        [30, 40, 60],
        [180, 215, 255],
        "LED Mk I",
    ),
    FixtureSpec::builtin(
        "SGL_LEDLampMkI_Red",
        Shape::Square { size: 48 },
        [40, 20, 30],
        [200, 40, 80],
        "LED Red",
    ),
    FixtureSpec::builtin(
        "SGL_LEDLampMkI_Blue",
        Shape::Square { size: 48 },
        [20, 25, 50],
        [80, 150, 255],
        "LED Blue",
    ),
    FixtureSpec::builtin(
        "SGL_AdvancedLEDArray",
        Shape::AdvancedGrid {
            width: 56,
            height: 56,
        },
        [10, 12, 18],
        [210, 238, 255],
        "Advanced LED",
    ),
];

/// Ordered, immutable set of fixtures with unique identifiers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    fixtures: Vec<FixtureSpec>,
}

impl Catalog {
    /// Create catalog, fails if identifiers are not unique
    pub fn new(fixtures: Vec<FixtureSpec>) -> Result<Self, SpecError> {
        let mut seen = HashSet::new();
        for spec in fixtures.iter() {
            if !seen.insert(spec.identifier()) {
                return Err(SpecError::malformed(
                    spec.identifier(),
                    "duplicate identifier",
                ));
            }
        }
        Ok(Self { fixtures })
    }

    /// Catalog of built-in grow lamps
    pub fn builtin() -> Self {
        Self {
            fixtures: LAMPS.to_vec(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FixtureSpec> {
        self.fixtures.iter()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Find fixture by its identifier
    pub fn get(&self, identifier: &str) -> Option<&FixtureSpec> {
        self.fixtures
            .iter()
            .find(|spec| spec.identifier() == identifier)
    }

    /// Load catalog from JSON array of fixture descriptions
    #[cfg(feature = "serde")]
    pub fn from_json(reader: impl std::io::Read) -> Result<Self, CatalogError> {
        let descs: Vec<crate::FixtureDesc> = serde_json::from_reader(reader)?;
        let fixtures = descs
            .iter()
            .map(FixtureSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("[catalog] {} fixtures loaded", fixtures.len());
        Ok(Self::new(fixtures)?)
    }

    /// Write catalog as pretty printed JSON array of fixture descriptions
    #[cfg(feature = "serde")]
    pub fn to_json(&self, writer: impl std::io::Write) -> Result<(), CatalogError> {
        let descs: Vec<_> = self.iter().map(crate::FixtureDesc::from).collect();
        serde_json::to_writer_pretty(writer, &descs)?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a FixtureSpec;
    type IntoIter = std::slice::Iter<'a, FixtureSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Rendered variant of a catalog fixture
#[derive(Debug)]
pub struct Rendered<'a> {
    pub spec: &'a FixtureSpec,
    pub variant: Variant,
    pub canvas: Canvas,
}

/// Render every variant of every fixture using up to `threads` worker threads.
///
/// Renders are independent, results come back in catalog order with the full
/// variant preceding the icon.
pub fn render_all(catalog: &Catalog, threads: usize) -> Vec<Rendered<'_>> {
    let jobs: Vec<(&FixtureSpec, Variant)> = catalog
        .iter()
        .flat_map(|spec| Variant::ALL.map(|variant| (spec, variant)))
        .collect();
    if jobs.is_empty() {
        return Vec::new();
    }
    let threads = threads.clamp(1, jobs.len());
    let chunk_size = jobs.len().div_ceil(threads);
    tracing::debug!("[render_all] {} jobs on {} threads", jobs.len(), threads);

    std::thread::scope(|scope| {
        let workers: Vec<_> = jobs
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&(spec, variant)| Rendered {
                            spec,
                            variant,
                            canvas: render(spec, variant),
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    })
}

#[cfg(feature = "serde")]
#[derive(Debug)]
pub enum CatalogError {
    Json(serde_json::Error),
    Spec(SpecError),
}

#[cfg(feature = "serde")]
impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Json(error) => write!(f, "Invalid catalog file: {}", error),
            CatalogError::Spec(error) => write!(f, "{}", error),
        }
    }
}

#[cfg(feature = "serde")]
impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Json(error) => Some(error),
            CatalogError::Spec(error) => Some(error),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for CatalogError {
    fn from(error: serde_json::Error) -> Self {
        CatalogError::Json(error)
    }
}

#[cfg(feature = "serde")]
impl From<SpecError> for CatalogError {
    fn from(error: SpecError) -> Self {
        CatalogError::Spec(error)
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in self.iter() {
            writeln!(
                f,
                "{:<24} {:<8} {:<14} housing:{} center:{}",
                spec.identifier(),
                spec.shape().kind(),
                spec.label(),
                spec.housing(),
                spec.center()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgba, ShapeKind};

    #[test]
    fn test_builtin_is_valid() -> Result<(), SpecError> {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 7);
        for spec in catalog.iter() {
            let checked = FixtureSpec::new(
                spec.identifier().to_owned(),
                spec.shape(),
                spec.housing(),
                spec.center(),
                spec.label().to_owned(),
            )?;
            assert_eq!(&checked, spec);
        }
        assert_eq!(Catalog::new(catalog.iter().cloned().collect())?, catalog);

        let kinds: HashSet<_> = catalog.iter().map(|spec| spec.shape().kind()).collect();
        assert_eq!(kinds.len(), ShapeKind::ALL.len());
        Ok(())
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::builtin();
        let sodium = catalog.get("SGL_SodiumLamp").expect("sodium lamp");
        assert_eq!(sodium.center(), Rgba::rgb(255, 140, 30));
        assert_eq!(sodium.label(), "Sodium");
        assert!(catalog.get("SGL_Missing").is_none());
        assert!(catalog.to_string().contains("SGL_LEDLampMkI_Blue"));
    }

    #[test]
    fn test_duplicate_identifier() {
        let catalog = Catalog::builtin();
        let mut fixtures: Vec<_> = catalog.iter().cloned().collect();
        fixtures.push(fixtures[0].clone());
        assert!(matches!(
            Catalog::new(fixtures),
            Err(SpecError::MalformedSpec { identifier, .. }) if identifier == "SGL_IncandLamp"
        ));
    }

    #[test]
    fn test_render_all() {
        let catalog = Catalog::builtin();
        let serial = render_all(&catalog, 1);
        assert_eq!(serial.len(), catalog.len() * 2);
        for threads in [2, 3, 64] {
            let parallel = render_all(&catalog, threads);
            assert_eq!(parallel.len(), serial.len());
            for (p, s) in parallel.iter().zip(serial.iter()) {
                assert_eq!(p.spec.identifier(), s.spec.identifier());
                assert_eq!(p.variant, s.variant);
                assert_eq!(p.canvas, s.canvas);
            }
        }
        assert_eq!(serial[0].variant, Variant::Full);
        assert_eq!(serial[1].variant, Variant::Icon);
        assert_eq!(serial[1].canvas, render(serial[1].spec, Variant::Icon));

        let empty = Catalog::new(Vec::new()).expect("empty catalog");
        assert!(render_all(&empty, 4).is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json() -> Result<(), CatalogError> {
        let catalog = Catalog::builtin();
        let mut json = Vec::new();
        catalog.to_json(&mut json)?;
        assert_eq!(Catalog::from_json(json.as_slice())?, catalog);

        let tube = r##"[{"name": "x", "shape": "tube", "housing": "#000000", "centre": "#ffffff"}]"##;
        let err = Catalog::from_json(tube.as_bytes());
        assert!(matches!(err, Err(CatalogError::Spec(SpecError::InvalidShape(_)))));

        let err = Catalog::from_json("{}".as_bytes());
        assert!(matches!(err, Err(CatalogError::Json(_))));
        Ok(())
    }
}
