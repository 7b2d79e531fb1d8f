pub mod patient_service;
