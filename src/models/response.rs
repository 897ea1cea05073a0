//! Response payloads
//!
//! Members keep their wire names. Optional members serialize as `null`
//! rather than being skipped so that strict decoding can echo them back.

use crate::adapters::athena::translator::SoftFailure;
use crate::models::converters::{loose_bool, us_date, wire_or_none, ExternalId};
use crate::models::enums::{
    AppointmentStatus, DocumentStatus, InsuranceSequence, PatientStatus, PrescriptionStatus, Sex,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `success`/`errormessage` outcome returned by most writes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseResponse {
    #[serde(with = "loose_bool")]
    pub success: bool,
    pub errormessage: Option<String>,
}

impl SoftFailure for BaseResponse {
    fn succeeded(&self) -> bool {
        self.success
    }

    fn error_message(&self) -> Option<&str> {
        self.errormessage.as_deref()
    }
}

/// `{"status": "..."}` returned by updates and deletes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusResponse {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentType {
    #[serde(rename = "appointmenttypeid")]
    pub id: ExternalId,
    pub name: Option<String>,
    pub shortname: Option<String>,
    /// Minutes
    pub duration: Option<ExternalId>,
    #[serde(with = "loose_bool")]
    pub generic: bool,
    #[serde(with = "loose_bool")]
    pub patient: bool,
    #[serde(with = "loose_bool")]
    pub templatetypeonly: bool,
    pub patientdisplayname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentTypeResponse {
    pub totalcount: u32,
    pub appointmenttypes: Vec<AppointmentType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appointment {
    #[serde(rename = "appointmentid")]
    pub id: ExternalId,
    #[serde(with = "wire_or_none")]
    pub appointmentstatus: Option<AppointmentStatus>,
    pub appointmenttype: Option<String>,
    pub appointmenttypeid: Option<ExternalId>,
    #[serde(with = "us_date")]
    pub date: Option<NaiveDate>,
    /// `HH:mm`
    pub starttime: Option<String>,
    pub duration: Option<ExternalId>,
    pub departmentid: Option<ExternalId>,
    pub patientid: Option<ExternalId>,
    pub providerid: Option<ExternalId>,
    pub cancelreasonname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppointmentResponse {
    pub totalcount: u32,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    #[serde(rename = "patientid")]
    pub id: ExternalId,
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub lastname: Option<String>,
    #[serde(with = "us_date")]
    pub dob: Option<NaiveDate>,
    #[serde(with = "wire_or_none")]
    pub sex: Option<Sex>,
    #[serde(with = "wire_or_none")]
    pub status: Option<PatientStatus>,
    pub email: Option<String>,
    pub homephone: Option<String>,
    pub mobilephone: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub departmentid: Option<ExternalId>,
    pub primarydepartmentid: Option<ExternalId>,
    pub primaryproviderid: Option<ExternalId>,
    pub insurances: Option<Vec<Insurance>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientResponse {
    pub totalcount: u32,
    pub patients: Vec<Patient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(rename = "documentid")]
    pub id: ExternalId,
    pub documentclass: Option<String>,
    pub documentsubclass: Option<String>,
    pub documentdescription: Option<String>,
    #[serde(with = "wire_or_none")]
    pub status: Option<DocumentStatus>,
    pub departmentid: Option<ExternalId>,
    pub encounterid: Option<ExternalId>,
    pub providerid: Option<ExternalId>,
    #[serde(with = "us_date")]
    pub createddate: Option<NaiveDate>,
    #[serde(with = "us_date")]
    pub lastmodifieddate: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentResponse {
    pub totalcount: u32,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddDocumentResponse {
    pub documentid: Option<ExternalId>,
    pub errormessage: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prescription {
    #[serde(rename = "documentid")]
    pub id: ExternalId,
    pub documentdescription: Option<String>,
    #[serde(with = "wire_or_none")]
    pub status: Option<PrescriptionStatus>,
    pub encounterid: Option<ExternalId>,
    pub providerid: Option<ExternalId>,
    pub orderingprovider: Option<String>,
    #[serde(with = "us_date")]
    pub createddate: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrescriptionResponse {
    pub totalcount: u32,
    pub prescriptions: Vec<Prescription>,
}

/// Patient photo as returned by `GET /patients/{patientid}/photo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoResponse {
    /// Base64-encoded image
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insurance {
    #[serde(rename = "insuranceid")]
    pub id: ExternalId,
    pub insurancepackageid: Option<ExternalId>,
    #[serde(with = "wire_or_none")]
    pub sequencenumber: Option<InsuranceSequence>,
    pub insuranceplanname: Option<String>,
    pub insurancetype: Option<String>,
    pub insuranceidnumber: Option<String>,
    pub policynumber: Option<String>,
    pub eligibilitystatus: Option<String>,
    pub insurancepolicyholder: Option<String>,
    #[serde(with = "us_date")]
    pub issuedate: Option<NaiveDate>,
    #[serde(with = "us_date")]
    pub expirationdate: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceResponse {
    pub totalcount: u32,
    pub insurances: Vec<Insurance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pharmacy {
    pub clinicalproviderid: Option<ExternalId>,
    pub clinicalprovidername: Option<String>,
    pub ncpdpid: Option<String>,
    pub pharmacytype: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phonenumber: Option<String>,
    pub faxnumber: Option<String>,
    #[serde(with = "loose_bool")]
    pub receivererxrequests: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    #[serde(rename = "providerid")]
    pub id: ExternalId,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub displayname: Option<String>,
    pub npi: Option<ExternalId>,
    pub providertype: Option<String>,
    pub specialty: Option<String>,
    #[serde(with = "loose_bool")]
    pub billable: bool,
    /// `Person` or `Non-Person`
    pub entitytype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderResponse {
    pub totalcount: u32,
    pub providers: Vec<Provider>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Practice {
    #[serde(rename = "practiceid")]
    pub id: ExternalId,
    pub name: Option<String>,
    #[serde(with = "us_date")]
    pub golivedate: Option<NaiveDate>,
    pub experiencemode: Option<String>,
    #[serde(with = "loose_bool")]
    pub iscoordinatorsender: bool,
    #[serde(with = "loose_bool")]
    pub hasclinicals: bool,
    #[serde(with = "loose_bool")]
    pub hascommunicator: bool,
    #[serde(with = "loose_bool")]
    pub iscoordinatorreceiver: bool,
    #[serde(with = "loose_bool")]
    pub hascollector: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeResponse {
    pub totalcount: u32,
    #[serde(rename = "practiceinfo")]
    pub practices: Vec<Practice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub name: String,
    #[serde(rename = "stateabbreviation")]
    pub abbreviation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    #[serde(rename = "languagename")]
    pub name: String,
    #[serde(rename = "iso6392code")]
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allergy {
    #[serde(rename = "allergenid")]
    pub id: ExternalId,
    #[serde(rename = "allergenname")]
    pub name: String,
}

/// A patient returned by enhanced best match, with its match score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientMatch {
    pub score: Option<ExternalId>,
    #[serde(flatten)]
    pub patient: Patient,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PharmacyResponse {
    pub totalcount: u32,
    pub pharmacies: Vec<Pharmacy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Encounter {
    #[serde(rename = "encounterid")]
    pub id: ExternalId,
    pub appointmentid: Option<ExternalId>,
    pub departmentid: Option<ExternalId>,
    pub patientid: Option<ExternalId>,
    pub providerid: Option<ExternalId>,
    pub providerfirstname: Option<String>,
    pub providerlastname: Option<String>,
    pub providerphone: Option<String>,
    #[serde(with = "us_date")]
    pub encounterdate: Option<NaiveDate>,
    /// `VISIT`, `ORDERSONLY`, ...
    pub encountertype: Option<String>,
    /// `OPEN`, `CLOSED`, `REVIEW`, ...
    pub status: Option<String>,
    pub stage: Option<String>,
    #[serde(with = "us_date")]
    pub closeddate: Option<NaiveDate>,
    pub diagnoses: Option<Vec<Diagnosis>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterResponse {
    pub totalcount: u32,
    pub encounters: Vec<Encounter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnosis {
    #[serde(rename = "diagnosisid")]
    pub id: ExternalId,
    pub description: Option<String>,
    pub note: Option<String>,
    pub ranking: Option<ExternalId>,
    pub laterality: Option<String>,
    #[serde(with = "loose_bool")]
    pub supportslaterality: bool,
    pub snomedcode: Option<ExternalId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Department {
    #[serde(rename = "departmentid")]
    pub id: ExternalId,
    pub name: Option<String>,
    pub patientdepartmentname: Option<String>,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub timezonename: Option<String>,
    pub providergroupid: Option<ExternalId>,
    pub providergroupname: Option<String>,
    #[serde(with = "loose_bool")]
    pub ishospitaldepartment: bool,
    pub providerlist: Option<Vec<ExternalId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentResponse {
    pub totalcount: u32,
    pub departments: Vec<Department>,
}

/// Packages most used by the practice, ranked
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopInsurancePackage {
    #[serde(rename = "insurancepackageid")]
    pub id: ExternalId,
    pub name: Option<String>,
    pub percentage: Option<String>,
    pub ranking: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonInsurancePackage {
    #[serde(rename = "insurancepackageid")]
    pub id: ExternalId,
    pub name: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub insuranceplanname: Option<String>,
    pub insuranceproducttype: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsurancePackageResponse<T> {
    #[serde(default)]
    pub totalcount: u32,
    #[serde(default = "Vec::new")]
    pub insurancepackages: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderType {
    #[serde(rename = "providertypeid")]
    pub id: String,
    #[serde(rename = "providertypename")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderTypeResponse {
    pub totalcount: u32,
    pub providertypes: Vec<ProviderType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ethnicity {
    #[serde(rename = "ethnicityid")]
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Race {
    #[serde(rename = "raceid")]
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientLocation {
    #[serde(rename = "patientlocationid")]
    pub id: ExternalId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::athena::decoder::{decode, DecodeMode};
    use crate::adapters::http::InboundResponse;

    #[test]
    fn test_practice_response_decodes_strictly() {
        let body = r#"{
            "totalcount": 1,
            "practiceinfo": [{
                "practiceid": "195900",
                "name": "athenahealth Sandbox",
                "golivedate": "01/01/2010",
                "experiencemode": "ATHENACLINICALS",
                "iscoordinatorsender": "false",
                "hasclinicals": "true",
                "hascommunicator": "true",
                "iscoordinatorreceiver": "false",
                "hascollector": "true"
            }]
        }"#;
        let response = InboundResponse::json(200, body);
        let decoded: PracticeResponse = decode(&response, DecodeMode::Strict).unwrap();
        assert_eq!(decoded.practices[0].id.as_u64(), Some(195900));
        assert!(decoded.practices[0].hasclinicals);
        assert_eq!(
            decoded.practices[0].golivedate,
            NaiveDate::from_ymd_opt(2010, 1, 1)
        );
    }

    #[test]
    fn test_patient_enums_and_blank_dates() {
        let body = r#"[{"patientid": 1, "sex": "F", "status": "active", "dob": ""}]"#;
        let response = InboundResponse::json(200, body);
        let patients: Vec<Patient> = decode(&response, DecodeMode::Strict).unwrap();
        assert_eq!(patients[0].sex, Some(Sex::Female));
        assert_eq!(patients[0].status, Some(PatientStatus::Active));
        assert_eq!(patients[0].dob, None);
    }

    #[test]
    fn test_base_response_soft_failure() {
        let response = InboundResponse::json(200, r#"{"success":"false","errormessage":"Photo locked"}"#);
        let outcome: BaseResponse = decode(&response, DecodeMode::Strict).unwrap();
        assert_eq!(outcome.failure_message(), Some("Photo locked"));
    }

    #[test]
    fn test_unknown_appointment_member_is_rejected() {
        let response = InboundResponse::json(
            200,
            r#"{"totalcount":1,"appointments":[{"appointmentid":"5","frobnicate":"x"}]}"#,
        );
        let err = decode::<AppointmentResponse>(&response, DecodeMode::Strict).unwrap_err();
        assert!(err.to_string().contains("$.appointments[0].frobnicate"));
    }

    #[test]
    fn test_patient_match_keeps_score_and_patient() {
        let body = r#"[{"score":26,"patientid":"7","firstname":"Jane","sex":"F"}]"#;
        let response = InboundResponse::json(200, body);
        let matches: Vec<PatientMatch> = decode(&response, DecodeMode::Strict).unwrap();
        assert_eq!(matches[0].score.as_ref().and_then(ExternalId::as_u64), Some(26));
        assert_eq!(matches[0].patient.id.as_str(), "7");
        assert_eq!(matches[0].patient.sex, Some(Sex::Female));
    }

    #[test]
    fn test_encounter_with_diagnoses() {
        let body = r#"{"totalcount":1,"encounters":[{
            "encounterid":"30",
            "encounterdate":"05/14/2023",
            "status":"CLOSED",
            "diagnoses":[{"diagnosisid":"4","description":"Hypertension","supportslaterality":"false"}]
        }]}"#;
        let response = InboundResponse::json(200, body);
        let decoded: EncounterResponse = decode(&response, DecodeMode::Strict).unwrap();
        let encounter = &decoded.encounters[0];
        assert_eq!(encounter.encounterdate, NaiveDate::from_ymd_opt(2023, 5, 14));
        let diagnoses = encounter.diagnoses.as_ref().unwrap();
        assert_eq!(diagnoses[0].description.as_deref(), Some("Hypertension"));
    }
}
