//! Fiducial reference points

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A fiducial pairs computed coordinates with the stage position it was taken at
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fiducial {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub computed: Option<Point>,
    #[serde(default)]
    pub stage: Option<Point>,
}

/// How a fiducial is addressed when deleting it: by id, or by row when it has none
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FiducialKey {
    Id(String),
    Index(usize),
}

impl Fiducial {
    pub fn key(&self, index: usize) -> FiducialKey {
        match &self.id {
            Some(id) if !id.is_empty() => FiducialKey::Id(id.clone()),
            _ => FiducialKey::Index(index),
        }
    }
}

/// Remove the fiducial addressed by `key`; returns true if one was removed
pub fn remove_fiducial(fiducials: &mut Vec<Fiducial>, key: &FiducialKey) -> bool {
    let position = match key {
        FiducialKey::Id(id) => fiducials
            .iter()
            .position(|f| f.id.as_deref() == Some(id.as_str())),
        FiducialKey::Index(index) => (*index < fiducials.len()).then_some(*index),
    };
    match position {
        Some(index) => {
            fiducials.remove(index);
            true
        }
        None => false,
    }
}

/// Format one coordinate pair, `---` for missing values
pub fn format_point(point: Option<&Point>) -> String {
    match point {
        Some(p) => format!("X: {:.3}, Y: {:.3}", p.x, p.y),
        None => "X: ---, Y: ---".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fiducial(id: Option<&str>, x: f64) -> Fiducial {
        Fiducial {
            id: id.map(str::to_string),
            computed: Some(Point { x, y: x * 2.0 }),
            stage: None,
        }
    }

    #[test]
    fn test_key_prefers_id() {
        assert_eq!(fiducial(Some("f1"), 0.0).key(4), FiducialKey::Id("f1".to_string()));
        assert_eq!(fiducial(None, 0.0).key(4), FiducialKey::Index(4));
        assert_eq!(fiducial(Some(""), 0.0).key(2), FiducialKey::Index(2));
    }

    #[test]
    fn test_remove_by_id_and_index() {
        let mut list = vec![fiducial(Some("a"), 1.0), fiducial(None, 2.0), fiducial(Some("c"), 3.0)];

        assert!(remove_fiducial(&mut list, &FiducialKey::Id("c".to_string())));
        assert_eq!(list.len(), 2);

        assert!(remove_fiducial(&mut list, &FiducialKey::Index(1)));
        assert_eq!(list, vec![fiducial(Some("a"), 1.0)]);

        assert!(!remove_fiducial(&mut list, &FiducialKey::Index(5)));
        assert!(!remove_fiducial(&mut list, &FiducialKey::Id("zzz".to_string())));
    }

    #[test]
    fn test_format_point() {
        assert_eq!(
            format_point(Some(&Point { x: 1.0, y: -0.25 })),
            "X: 1.000, Y: -0.250"
        );
        assert_eq!(format_point(None), "X: ---, Y: ---");
    }
}
