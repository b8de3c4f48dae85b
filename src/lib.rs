pub mod auditorium;
pub mod config;
pub mod controllers;
pub mod directory;
pub mod error;
pub mod grid;
pub mod middleware;
pub mod models;
pub mod services;

use std::path::{Path, PathBuf};
use tracing::info;

use auditorium::Auditorium;
use config::Config;
use directory::CustomerDirectory;
use error::{BookingError, LoadError};
use models::Customer;

// State shared by every flow: auditoriums, customers and settings
#[derive(Debug, Clone)]
pub struct Theater {
    auditoriums: Vec<Auditorium>,
    customers: CustomerDirectory,
    config: Config,
}

impl Theater {
    pub fn new(config: Config, auditoriums: Vec<Auditorium>, customers: CustomerDirectory) -> Self {
        Self { auditoriums, customers, config }
    }

    /// Load the user database and every configured layout. Auditoriums are
    /// numbered from 1 in the order their files are listed.
    pub fn load(config: Config) -> Result<Self, LoadError> {
        let customers = CustomerDirectory::from_file(&config.data.user_db, config.directory.initial_buckets)?;

        let auditoriums = config
            .data
            .auditorium_files
            .iter()
            .zip(1..)
            .map(|(path, number)| Auditorium::from_file(path, number))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Theater ready: {} auditoriums, {} customers", auditoriums.len(), customers.len());
        Ok(Self::new(config, auditoriums, customers))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auditoriums(&self) -> &[Auditorium] {
        &self.auditoriums
    }

    pub fn auditorium(&self, number: u32) -> Option<&Auditorium> {
        self.auditoriums.iter().find(|auditorium| auditorium.number() == number)
    }

    pub fn auditorium_mut(&mut self, number: u32) -> Option<&mut Auditorium> {
        self.auditoriums.iter_mut().find(|auditorium| auditorium.number() == number)
    }

    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    /// Mutable access to one customer and to the auditoriums at the same time.
    pub(crate) fn customer_and_auditoriums(
        &mut self,
        username: &str,
    ) -> Result<(&mut Customer, &mut [Auditorium]), BookingError> {
        let Theater { auditoriums, customers, .. } = self;
        let customer = customers
            .get_mut(username)
            .ok_or_else(|| BookingError::UnknownCustomer(username.to_string()))?;
        Ok((customer, auditoriums.as_mut_slice()))
    }

    /// Write every auditorium as `A<n>Final.txt` under `dir`.
    pub fn save_all(&self, dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        self.auditoriums
            .iter()
            .map(|auditorium| {
                let path = dir.join(format!("A{}Final.txt", auditorium.number()));
                auditorium.save_to_file(&path).map(|()| path)
            })
            .collect()
    }
}
