use anyhow::bail;
use anyhow::Result;
use glam::Vec2;

/// Ball spawn point and goal center for a single level, in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelDefinition {
    pub ball_start: Vec2,
    pub goal_position: Vec2,
}

#[derive(Clone, Debug)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

const DEFAULT_LEVELS: [LevelDefinition; 3] = [
    LevelDefinition { ball_start: Vec2::new(50.0, 50.0), goal_position: Vec2::new(600.0, 400.0) },
    LevelDefinition { ball_start: Vec2::new(320.0, 50.0), goal_position: Vec2::new(50.0, 400.0) },
    LevelDefinition { ball_start: Vec2::new(600.0, 50.0), goal_position: Vec2::new(50.0, 50.0) },
];

impl LevelCatalog {
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self> {
        if levels.is_empty() {
            bail!("Level catalog requires at least one level");
        }

        Ok(Self { levels })
    }

    pub fn get(&self, index: usize) -> Result<LevelDefinition> {
        match self.levels.get(index) {
            Some(level) => Ok(*level),
            None => bail!("Level {} is out of range (catalog has {} levels)", index, self.levels.len()),
        }
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    pub fn last_index(&self) -> usize {
        self.levels.len() - 1
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self { levels: DEFAULT_LEVELS.to_vec() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_contiguous() {
        let catalog = LevelCatalog::default();

        assert_eq!(catalog.count(), 3);
        assert_eq!(catalog.last_index(), 2);

        for index in 0..catalog.count() {
            assert!(catalog.get(index).is_ok());
        }

        assert!(catalog.get(catalog.count()).is_err());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(LevelCatalog::new(Vec::new()).is_err());
        assert!(LevelCatalog::new(DEFAULT_LEVELS.to_vec()).is_ok());
    }
}
