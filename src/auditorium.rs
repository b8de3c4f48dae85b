use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::LoadError;
use crate::grid::SeatGrid;

/// A numbered hall and its seat grid.
#[derive(Debug, Clone)]
pub struct Auditorium {
    number: u32,
    grid: SeatGrid,
}

impl Auditorium {
    pub fn new(number: u32, grid: SeatGrid) -> Self {
        Self { number, grid }
    }

    pub fn from_file(path: impl AsRef<Path>, number: u32) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let layout = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let grid = SeatGrid::load(&layout)?;
        info!(
            "Loaded auditorium {} from {} ({} rows x {} seats, {} reserved)",
            number,
            path.display(),
            grid.rows(),
            grid.columns(),
            grid.reserved_count()
        );
        Ok(Self { number, grid })
    }

    /// Write the current layout back in the format `from_file` reads.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        fs::write(path, self.grid.serialize())?;
        info!("Saved auditorium {} to {}", self.number, path.display());
        Ok(())
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SeatGrid {
        &mut self.grid
    }
}
