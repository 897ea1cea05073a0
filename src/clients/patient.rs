//! Patients and their charts: documents, insurances, pharmacies, encounters
//! and images

use super::first_or_not_found;
use crate::adapters::athena::Connection;
use crate::domain::{AthenaError, Result};
use crate::models::enums::InsuranceSequence;
use crate::models::request::{
    AddDocument, CreateInsurance, EnhancedBestmatchFilter, GetDocumentsFilter,
    GetPatientAppointmentsFilter, GetPatientByIdFilter, GetPatientEncountersFilter,
    GetPatientsFilter, GetPreferredPharmaciesFilter, GetPrescriptionsFilter, SetPharmacy,
    UpdatePhoto,
};
use crate::models::response::{
    AddDocumentResponse, AppointmentResponse, BaseResponse, DocumentResponse, EncounterResponse,
    Insurance, InsuranceResponse, Patient, PatientMatch, PatientResponse, Pharmacy,
    PharmacyResponse, PhotoResponse, PrescriptionResponse, StatusResponse,
};
use base64::Engine as _;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PatientClient {
    connection: Arc<Connection>,
}

impl PatientClient {
    pub fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// # Errors
    ///
    /// `NotFound` when no patient has this id.
    pub async fn patient(
        &self,
        patient_id: u32,
        filter: Option<&GetPatientByIdFilter>,
    ) -> Result<Patient> {
        let patients: Vec<Patient> = self
            .connection
            .fetch(format!("patients/{patient_id}"))
            .query_opt(filter)
            .send()
            .await?;
        first_or_not_found(patients, &format!("Patient {patient_id}"))
    }

    pub async fn search(&self, filter: &GetPatientsFilter) -> Result<PatientResponse> {
        self.connection.fetch("patients").query(filter).send().await
    }

    /// Scored matches on name and date of birth; no match is an empty list
    pub async fn enhanced_bestmatch(
        &self,
        filter: &EnhancedBestmatchFilter,
    ) -> Result<Vec<PatientMatch>> {
        self.connection
            .fetch("patients/enhancedbestmatch")
            .query(filter)
            .send()
            .await
    }

    pub async fn appointments(
        &self,
        patient_id: u32,
        filter: Option<&GetPatientAppointmentsFilter>,
    ) -> Result<AppointmentResponse> {
        self.connection
            .fetch(format!("patients/{patient_id}/appointments"))
            .query_opt(filter)
            .send()
            .await
    }

    pub async fn encounters(
        &self,
        patient_id: u32,
        filter: &GetPatientEncountersFilter,
    ) -> Result<EncounterResponse> {
        self.connection
            .fetch(format!("chart/{patient_id}/encounters"))
            .query(filter)
            .send()
            .await
    }

    pub async fn documents(
        &self,
        patient_id: u32,
        filter: &GetDocumentsFilter,
    ) -> Result<DocumentResponse> {
        self.connection
            .fetch(format!("patients/{patient_id}/documents"))
            .query(filter)
            .send()
            .await
    }

    /// Uploads a document as `multipart/form-data`
    pub async fn add_document(
        &self,
        patient_id: u32,
        document: &AddDocument,
    ) -> Result<AddDocumentResponse> {
        self.connection
            .create(format!("patients/{patient_id}/documents"))
            .multipart(document)
            .send()
            .await
    }

    pub async fn prescriptions(
        &self,
        patient_id: u32,
        filter: &GetPrescriptionsFilter,
    ) -> Result<PrescriptionResponse> {
        self.connection
            .fetch(format!("patients/{patient_id}/documents/prescription"))
            .query(filter)
            .send()
            .await
    }

    pub async fn default_pharmacy(&self, patient_id: u32, department_id: u32) -> Result<Pharmacy> {
        self.connection
            .fetch(format!("chart/{patient_id}/pharmacies/default"))
            .param("departmentid", department_id)
            .send()
            .await
    }

    pub async fn preferred_pharmacies(
        &self,
        patient_id: u32,
        filter: &GetPreferredPharmaciesFilter,
    ) -> Result<PharmacyResponse> {
        self.connection
            .fetch(format!("chart/{patient_id}/pharmacies/preferred"))
            .query(filter)
            .send()
            .await
    }

    pub async fn set_default_pharmacy(
        &self,
        patient_id: u32,
        pharmacy: &SetPharmacy,
    ) -> Result<StatusResponse> {
        self.connection
            .replace(format!("chart/{patient_id}/pharmacies/default"))
            .form(pharmacy)
            .send()
            .await
    }

    pub async fn add_preferred_pharmacy(
        &self,
        patient_id: u32,
        pharmacy: &SetPharmacy,
    ) -> Result<StatusResponse> {
        self.connection
            .replace(format!("chart/{patient_id}/pharmacies/preferred"))
            .form(pharmacy)
            .send()
            .await
    }

    pub async fn insurances(&self, patient_id: u32) -> Result<InsuranceResponse> {
        self.connection
            .fetch(format!("patients/{patient_id}/insurances"))
            .send()
            .await
    }

    /// # Errors
    ///
    /// `NotFound` when the server answers with an empty array.
    pub async fn create_insurance(
        &self,
        patient_id: u32,
        insurance: &CreateInsurance,
    ) -> Result<Insurance> {
        let created: Vec<Insurance> = self
            .connection
            .create(format!("patients/{patient_id}/insurances"))
            .form(insurance)
            .send()
            .await?;
        first_or_not_found(created, &format!("Created insurance for patient {patient_id}"))
    }

    pub async fn update_insurance(
        &self,
        patient_id: u32,
        insurance: &CreateInsurance,
    ) -> Result<StatusResponse> {
        self.connection
            .replace(format!("patients/{patient_id}/insurances"))
            .form(insurance)
            .send()
            .await
    }

    pub async fn delete_insurance(
        &self,
        patient_id: u32,
        sequence_number: InsuranceSequence,
        department_id: Option<u32>,
        cancellation_note: Option<&str>,
    ) -> Result<StatusResponse> {
        self.connection
            .remove(format!("patients/{patient_id}/insurances"))
            .param("sequencenumber", crate::adapters::athena::FieldValue::wire(sequence_number))
            .param_opt("departmentid", department_id)
            .param_opt("cancellationnote", cancellation_note)
            .send()
            .await
    }

    /// Decoded photo bytes; the API sends them base64-encoded in JSON
    ///
    /// # Errors
    ///
    /// `Decode` when the `image` member is not valid base64.
    pub async fn photo(&self, patient_id: u32) -> Result<Vec<u8>> {
        let photo: PhotoResponse = self
            .connection
            .fetch(format!("patients/{patient_id}/photo"))
            .send()
            .await?;
        decode_image(&photo, "Patient photo")
    }

    /// Raw JPEG bytes via `jpegoutput=true`
    pub async fn photo_jpeg(&self, patient_id: u32) -> Result<Vec<u8>> {
        self.connection
            .fetch(format!("patients/{patient_id}/photo"))
            .param("jpegoutput", true)
            .send_bytes()
            .await
    }

    /// Soft failures come back as `success: false`; see
    /// [`SoftFailure`](crate::adapters::athena::SoftFailure).
    pub async fn update_photo(&self, patient_id: u32, photo: &UpdatePhoto) -> Result<BaseResponse> {
        self.connection
            .create(format!("patients/{patient_id}/photo"))
            .multipart(photo)
            .send()
            .await
    }

    pub async fn delete_photo(&self, patient_id: u32) -> Result<BaseResponse> {
        self.connection
            .remove(format!("patients/{patient_id}/photo"))
            .send()
            .await
    }
    /// Decoded insurance card image
    ///
    /// # Errors
    ///
    /// `NotFound` when no card image is on file, `Decode` when the `image`
    /// member is not valid base64.
    pub async fn insurance_card_image(&self, patient_id: u32, insurance_id: u32) -> Result<Vec<u8>> {
        let image: PhotoResponse = self
            .connection
            .fetch(format!("patients/{patient_id}/insurances/{insurance_id}/image"))
            .send()
            .await?;
        decode_image(&image, "Insurance card image")
    }

    /// Raw JPEG insurance card image via `jpegoutput=true`
    pub async fn insurance_card_image_jpeg(
        &self,
        patient_id: u32,
        insurance_id: u32,
    ) -> Result<Vec<u8>> {
        self.connection
            .fetch(format!("patients/{patient_id}/insurances/{insurance_id}/image"))
            .param("jpegoutput", true)
            .send_bytes()
            .await
    }

    pub async fn update_insurance_card_image(
        &self,
        patient_id: u32,
        insurance_id: u32,
        image: &UpdatePhoto,
    ) -> Result<BaseResponse> {
        self.connection
            .create(format!("patients/{patient_id}/insurances/{insurance_id}/image"))
            .multipart(image)
            .send()
            .await
    }

    pub async fn delete_insurance_card_image(
        &self,
        patient_id: u32,
        insurance_id: u32,
    ) -> Result<BaseResponse> {
        self.connection
            .remove(format!("patients/{patient_id}/insurances/{insurance_id}/image"))
            .send()
            .await
    }
}

fn decode_image(image: &PhotoResponse, what: &str) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(image.image.trim())
        .map_err(|e| AthenaError::Decode(format!("{what} is not valid base64: {e}")))
}
