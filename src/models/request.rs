//! Filters and request bodies
//!
//! Every shape implements [`RequestShape`] with a `const` descriptor table
//! mapping its fields onto wire keys.

use crate::adapters::athena::encoder::{FieldDescriptor, FieldValue, Paging, RequestShape};
use crate::adapters::http::Attachment;
use crate::models::enums::{
    AppointmentStatus, DocumentStatus, DocumentSubclass, InsuranceSequence, PatientStatus,
    PrescriptionStatus, Sex,
};
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime};

/// Filter for `GET /appointmenttypes`
#[derive(Debug, Clone, Default)]
pub struct GetAppointmentTypesFilter {
    pub hide_generic: Option<bool>,
    pub hide_non_generic: Option<bool>,
    pub hide_non_patient: Option<bool>,
    pub hide_template_type_only: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RequestShape for GetAppointmentTypesFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("hidegeneric", |f: &Self| f.hide_generic.map(FieldValue::from)),
        FieldDescriptor::new("hidenongeneric", |f: &Self| {
            f.hide_non_generic.map(FieldValue::from)
        }),
        FieldDescriptor::new("hidenonpatient", |f: &Self| {
            f.hide_non_patient.map(FieldValue::from)
        }),
        FieldDescriptor::new("hidetemplatetypeonly", |f: &Self| {
            f.hide_template_type_only.map(FieldValue::from)
        }),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /appointments/booked`
///
/// With more than one department the multi-department route is used.
#[derive(Debug, Clone)]
pub struct GetBookedAppointmentsFilter {
    pub appointment_status: Option<AppointmentStatus>,
    pub appointment_type_id: Option<u32>,
    pub department_ids: Vec<u32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Sent as `MM/dd/yyyy HH:mm:ss`
    pub start_last_modified: Option<NaiveDateTime>,
    /// Sent as `MM/dd/yyyy HH:mm:ss`; requires `start_last_modified`
    pub end_last_modified: Option<NaiveDateTime>,
    pub patient_id: Option<u32>,
    pub provider_ids: Vec<u32>,
    pub scheduled_start_date: Option<NaiveDate>,
    pub scheduled_end_date: Option<NaiveDate>,
    pub show_cancelled: bool,
    pub show_reminder_call_detail: bool,
    /// Defaults to 1000; this endpoint allows up to 10000
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetBookedAppointmentsFilter {
    pub fn new(department_ids: Vec<u32>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            appointment_status: None,
            appointment_type_id: None,
            department_ids,
            start_date,
            end_date,
            start_last_modified: None,
            end_last_modified: None,
            patient_id: None,
            provider_ids: Vec::new(),
            scheduled_start_date: None,
            scheduled_end_date: None,
            show_cancelled: false,
            show_reminder_call_detail: false,
            limit: Some(1000),
            offset: None,
        }
    }
}

impl RequestShape for GetBookedAppointmentsFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("appointmentstatus", |f: &Self| {
            f.appointment_status.map(FieldValue::wire)
        }),
        FieldDescriptor::new("appointmenttypeid", |f: &Self| {
            f.appointment_type_id.map(FieldValue::from)
        }),
        FieldDescriptor::new("departmentid", |f: &Self| {
            Some(FieldValue::int_list(&f.department_ids))
        }),
        FieldDescriptor::new("startdate", |f: &Self| Some(FieldValue::date(f.start_date))),
        FieldDescriptor::new("enddate", |f: &Self| Some(FieldValue::date(f.end_date))),
        FieldDescriptor::new("startlastmodified", |f: &Self| {
            f.start_last_modified.map(FieldValue::date_time)
        }),
        FieldDescriptor::new("endlastmodified", |f: &Self| {
            f.end_last_modified.map(FieldValue::date_time)
        }),
        FieldDescriptor::new("patientid", |f: &Self| f.patient_id.map(FieldValue::from)),
        FieldDescriptor::new("providerid", |f: &Self| {
            Some(FieldValue::int_list(&f.provider_ids))
        }),
        FieldDescriptor::new("scheduledstartdate", |f: &Self| {
            f.scheduled_start_date.map(FieldValue::date)
        }),
        FieldDescriptor::new("scheduledenddate", |f: &Self| {
            f.scheduled_end_date.map(FieldValue::date)
        }),
        FieldDescriptor::new("showcancelled", |f: &Self| Some(f.show_cancelled.into())),
        FieldDescriptor::new("showremindercalldetail", |f: &Self| {
            Some(f.show_reminder_call_detail.into())
        }),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /patients/{patientid}`
#[derive(Debug, Clone, Default)]
pub struct GetPatientByIdFilter {
    pub department_id: Option<u32>,
    pub show_insurance: Option<bool>,
    pub show_portal_status: Option<bool>,
    pub show_custom_fields: Option<bool>,
}

impl RequestShape for GetPatientByIdFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| f.department_id.map(FieldValue::from)),
        FieldDescriptor::new("showinsurance", |f: &Self| f.show_insurance.map(FieldValue::from)),
        FieldDescriptor::new("showportalstatus", |f: &Self| {
            f.show_portal_status.map(FieldValue::from)
        }),
        FieldDescriptor::new("showcustomfields", |f: &Self| {
            f.show_custom_fields.map(FieldValue::from)
        }),
    ];
}

/// Search filter for `GET /patients`
#[derive(Debug, Clone, Default)]
pub struct GetPatientsFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub department_id: Option<u32>,
    pub sex: Option<Sex>,
    pub status: Option<PatientStatus>,
    pub home_phone: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RequestShape for GetPatientsFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("firstname", |f: &Self| f.first_name.as_deref().map(FieldValue::from)),
        FieldDescriptor::new("lastname", |f: &Self| f.last_name.as_deref().map(FieldValue::from)),
        FieldDescriptor::new("dob", |f: &Self| f.dob.map(FieldValue::date)),
        FieldDescriptor::new("departmentid", |f: &Self| f.department_id.map(FieldValue::from)),
        FieldDescriptor::new("sex", |f: &Self| f.sex.map(FieldValue::wire)),
        FieldDescriptor::new("status", |f: &Self| f.status.map(FieldValue::wire)),
        FieldDescriptor::new("homephone", |f: &Self| f.home_phone.as_deref().map(FieldValue::from)),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /patients/{patientid}/documents`
#[derive(Debug, Clone)]
pub struct GetDocumentsFilter {
    pub department_id: u32,
    /// Comma-separated document classes
    pub document_class: Option<String>,
    pub document_subclass: Option<String>,
    pub encounter_id: Option<u32>,
    pub show_declined_orders: Option<bool>,
    pub show_deleted: Option<bool>,
    pub status: Option<DocumentStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetDocumentsFilter {
    pub fn new(department_id: u32) -> Self {
        Self {
            department_id,
            document_class: None,
            document_subclass: None,
            encounter_id: None,
            show_declined_orders: None,
            show_deleted: Some(false),
            status: None,
            limit: None,
            offset: None,
        }
    }
}

impl RequestShape for GetDocumentsFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| Some(f.department_id.into())),
        FieldDescriptor::new("documentclass", |f: &Self| {
            f.document_class.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("documentsubclass", |f: &Self| {
            f.document_subclass.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("encounterid", |f: &Self| f.encounter_id.map(FieldValue::from)),
        FieldDescriptor::new("showdeclinedorders", |f: &Self| {
            f.show_declined_orders.map(FieldValue::from)
        }),
        FieldDescriptor::new("showdeleted", |f: &Self| f.show_deleted.map(FieldValue::from)),
        FieldDescriptor::new("status", |f: &Self| f.status.map(FieldValue::wire)),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /patients/{patientid}/documents/prescription`
#[derive(Debug, Clone)]
pub struct GetPrescriptionsFilter {
    pub department_id: u32,
    pub encounter_id: Option<u32>,
    pub show_declined_orders: Option<bool>,
    pub show_deleted: bool,
    pub status: Option<PrescriptionStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetPrescriptionsFilter {
    pub fn new(department_id: u32) -> Self {
        Self {
            department_id,
            encounter_id: None,
            show_declined_orders: None,
            show_deleted: false,
            status: None,
            limit: None,
            offset: None,
        }
    }
}

impl RequestShape for GetPrescriptionsFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| Some(f.department_id.into())),
        FieldDescriptor::new("encounterid", |f: &Self| f.encounter_id.map(FieldValue::from)),
        FieldDescriptor::new("showdeclinedorders", |f: &Self| {
            f.show_declined_orders.map(FieldValue::from)
        }),
        FieldDescriptor::new("showdeleted", |f: &Self| Some(f.show_deleted.into())),
        FieldDescriptor::new("status", |f: &Self| f.status.map(FieldValue::wire)),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Body of `POST /patients/{patientid}/documents`, always multipart
#[derive(Debug, Clone)]
pub struct AddDocument {
    pub action_note: Option<String>,
    /// Only usable after check-in; `department_id` wins when both are set
    pub appointment_id: Option<u32>,
    pub attachment: Attachment,
    /// Skip the clinical inbox and file the document as closed
    pub auto_close: Option<bool>,
    pub department_id: u32,
    pub document_subclass: DocumentSubclass,
    pub internal_note: Option<String>,
    pub provider_id: Option<u32>,
}

impl AddDocument {
    pub fn new(department_id: u32, attachment: Attachment, document_subclass: DocumentSubclass) -> Self {
        Self {
            action_note: None,
            appointment_id: None,
            attachment,
            auto_close: None,
            department_id,
            document_subclass,
            internal_note: None,
            provider_id: None,
        }
    }
}

impl RequestShape for AddDocument {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("actionnote", |f: &Self| f.action_note.as_deref().map(FieldValue::from)),
        FieldDescriptor::new("appointmentid", |f: &Self| f.appointment_id.map(FieldValue::from)),
        FieldDescriptor::new("attachmentcontents", |f: &Self| {
            Some(FieldValue::Attachment(f.attachment.clone()))
        }),
        FieldDescriptor::new("autoclose", |f: &Self| f.auto_close.map(FieldValue::from)),
        FieldDescriptor::new("departmentid", |f: &Self| Some(f.department_id.into())),
        FieldDescriptor::new("documentsubclass", |f: &Self| {
            Some(FieldValue::wire(f.document_subclass))
        }),
        FieldDescriptor::new("internalnote", |f: &Self| {
            f.internal_note.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("providerid", |f: &Self| f.provider_id.map(FieldValue::from)),
    ];
}

/// Body of `POST /patients/{patientid}/photo`, also used for
/// insurance card images
#[derive(Debug, Clone, Default)]
pub struct UpdatePhoto {
    /// Base64-encoded image
    pub image: String,
}

impl UpdatePhoto {
    pub fn from_bytes(image: &[u8]) -> Self {
        Self {
            image: base64::engine::general_purpose::STANDARD.encode(image),
        }
    }
}

impl RequestShape for UpdatePhoto {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor::new("image", |f: &Self| {
        Some(FieldValue::from(f.image.as_str()))
    })];
}

/// Body of `POST /patients/{patientid}/insurances`
#[derive(Debug, Clone)]
pub struct CreateInsurance {
    pub department_id: Option<u32>,
    pub expiration_date: Option<NaiveDate>,
    pub insurance_id_number: Option<String>,
    pub insurance_package_id: u32,
    pub insurance_phone: Option<String>,
    pub policy_holder_first_name: Option<String>,
    pub policy_holder_last_name: Option<String>,
    pub policy_holder_sex: Option<Sex>,
    pub policy_holder_dob: Option<NaiveDate>,
    pub issue_date: Option<NaiveDate>,
    pub policy_number: Option<String>,
    /// Please note: 12 requires an entity type of 2
    pub relationship_to_insured_id: Option<u32>,
    pub sequence_number: InsuranceSequence,
    pub update_appointments: bool,
    pub validate_insurance_id_number: bool,
}

impl CreateInsurance {
    pub fn new(insurance_package_id: u32, sequence_number: InsuranceSequence) -> Self {
        Self {
            department_id: None,
            expiration_date: None,
            insurance_id_number: None,
            insurance_package_id,
            insurance_phone: None,
            policy_holder_first_name: None,
            policy_holder_last_name: None,
            policy_holder_sex: None,
            policy_holder_dob: None,
            issue_date: None,
            policy_number: None,
            relationship_to_insured_id: None,
            sequence_number,
            update_appointments: false,
            validate_insurance_id_number: false,
        }
    }
}

impl RequestShape for CreateInsurance {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| f.department_id.map(FieldValue::from)),
        FieldDescriptor::new("expirationdate", |f: &Self| f.expiration_date.map(FieldValue::date)),
        FieldDescriptor::new("insuranceidnumber", |f: &Self| {
            f.insurance_id_number.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("insurancepackageid", |f: &Self| {
            Some(f.insurance_package_id.into())
        }),
        FieldDescriptor::new("insurancephone", |f: &Self| {
            f.insurance_phone.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("insurancepolicyholderfirstname", |f: &Self| {
            f.policy_holder_first_name.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("insurancepolicyholderlastname", |f: &Self| {
            f.policy_holder_last_name.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("insurancepolicyholdersex", |f: &Self| {
            f.policy_holder_sex.map(FieldValue::wire)
        }),
        FieldDescriptor::new("insurancepolicyholderdob", |f: &Self| {
            f.policy_holder_dob.map(FieldValue::date)
        }),
        FieldDescriptor::new("issuedate", |f: &Self| f.issue_date.map(FieldValue::date)),
        FieldDescriptor::new("policynumber", |f: &Self| {
            f.policy_number.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("relationshiptoinsuredid", |f: &Self| {
            f.relationship_to_insured_id.map(FieldValue::from)
        }),
        FieldDescriptor::new("sequencenumber", |f: &Self| {
            Some(FieldValue::wire(f.sequence_number))
        }),
        FieldDescriptor::new("updateappointments", |f: &Self| {
            Some(f.update_appointments.into())
        }),
        FieldDescriptor::new("validateinsuranceidnumber", |f: &Self| {
            Some(f.validate_insurance_id_number.into())
        }),
    ];
}

/// Filter for `GET /providers`
#[derive(Debug, Clone, Default)]
pub struct GetProvidersFilter {
    pub name: Option<String>,
    pub show_all_provider_ids: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RequestShape for GetProvidersFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("name", |f: &Self| f.name.as_deref().map(FieldValue::from)),
        FieldDescriptor::new("showallproviderids", |f: &Self| {
            f.show_all_provider_ids.map(FieldValue::from)
        }),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /providers/{providerid}`
#[derive(Debug, Clone, Default)]
pub struct GetProviderByIdFilter {
    pub show_all_provider_ids: Option<bool>,
}

impl RequestShape for GetProviderByIdFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor::new(
        "showallproviderids",
        |f: &Self| f.show_all_provider_ids.map(FieldValue::from),
    )];
}

/// Filter for `GET /patients/{patientid}/appointments`
#[derive(Debug, Clone, Default)]
pub struct GetPatientAppointmentsFilter {
    pub department_id: Option<u32>,
    pub provider_id: Option<u32>,
    pub show_cancelled: Option<bool>,
    pub show_past: Option<bool>,
    pub show_expected_procedure_codes: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RequestShape for GetPatientAppointmentsFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| f.department_id.map(FieldValue::from)),
        FieldDescriptor::new("providerid", |f: &Self| f.provider_id.map(FieldValue::from)),
        FieldDescriptor::new("showcancelled", |f: &Self| f.show_cancelled.map(FieldValue::from)),
        FieldDescriptor::new("showpast", |f: &Self| f.show_past.map(FieldValue::from)),
        FieldDescriptor::new("showexpectedprocedurecodes", |f: &Self| {
            f.show_expected_procedure_codes.map(FieldValue::from)
        }),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /patients/enhancedbestmatch`
#[derive(Debug, Clone)]
pub struct EnhancedBestmatchFilter {
    pub dob: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    pub department_id: Option<u32>,
    pub email: Option<String>,
    pub home_phone: Option<String>,
    pub mobile_phone: Option<String>,
    pub zip: Option<String>,
    /// Matches scoring below this are dropped
    pub min_score: Option<u32>,
    pub show_insurance: Option<bool>,
    pub show_portal_status: Option<bool>,
    pub show_custom_fields: Option<bool>,
    pub show_all_patient_department_status: Option<bool>,
}

impl EnhancedBestmatchFilter {
    pub fn new(dob: NaiveDate, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            dob,
            first_name: first_name.into(),
            last_name: last_name.into(),
            department_id: None,
            email: None,
            home_phone: None,
            mobile_phone: None,
            zip: None,
            min_score: None,
            show_insurance: None,
            show_portal_status: None,
            show_custom_fields: None,
            show_all_patient_department_status: None,
        }
    }
}

impl RequestShape for EnhancedBestmatchFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("dob", |f: &Self| Some(FieldValue::date(f.dob))),
        FieldDescriptor::new("firstname", |f: &Self| Some(f.first_name.as_str().into())),
        FieldDescriptor::new("lastname", |f: &Self| Some(f.last_name.as_str().into())),
        FieldDescriptor::new("departmentid", |f: &Self| f.department_id.map(FieldValue::from)),
        FieldDescriptor::new("email", |f: &Self| f.email.as_deref().map(FieldValue::from)),
        FieldDescriptor::new("homephone", |f: &Self| f.home_phone.as_deref().map(FieldValue::from)),
        FieldDescriptor::new("mobilephone", |f: &Self| {
            f.mobile_phone.as_deref().map(FieldValue::from)
        }),
        FieldDescriptor::new("zip", |f: &Self| f.zip.as_deref().map(FieldValue::from)),
        FieldDescriptor::new("minscore", |f: &Self| f.min_score.map(FieldValue::from)),
        FieldDescriptor::new("showinsurance", |f: &Self| f.show_insurance.map(FieldValue::from)),
        FieldDescriptor::new("showportalstatus", |f: &Self| {
            f.show_portal_status.map(FieldValue::from)
        }),
        FieldDescriptor::new("showcustomfields", |f: &Self| {
            f.show_custom_fields.map(FieldValue::from)
        }),
        FieldDescriptor::new("showallpatientdepartmentstatus", |f: &Self| {
            f.show_all_patient_department_status.map(FieldValue::from)
        }),
    ];
}

/// Filter for `GET /chart/{patientid}/pharmacies/preferred`
#[derive(Debug, Clone)]
pub struct GetPreferredPharmaciesFilter {
    pub department_id: u32,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetPreferredPharmaciesFilter {
    pub fn new(department_id: u32) -> Self {
        Self {
            department_id,
            limit: None,
            offset: None,
        }
    }
}

impl RequestShape for GetPreferredPharmaciesFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor::new(
        "departmentid",
        |f: &Self| Some(f.department_id.into()),
    )];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Body of the default and preferred pharmacy updates
#[derive(Debug, Clone)]
pub struct SetPharmacy {
    pub department_id: u32,
    /// athenaNet id of the pharmacy
    pub clinical_provider_id: Option<u32>,
    pub ncpdp_id: Option<String>,
}

impl SetPharmacy {
    pub fn new(department_id: u32) -> Self {
        Self {
            department_id,
            clinical_provider_id: None,
            ncpdp_id: None,
        }
    }
}

impl RequestShape for SetPharmacy {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| Some(f.department_id.into())),
        FieldDescriptor::new("clinicalproviderid", |f: &Self| {
            f.clinical_provider_id.map(FieldValue::from)
        }),
        FieldDescriptor::new("ncpdpid", |f: &Self| f.ncpdp_id.as_deref().map(FieldValue::from)),
    ];
}

/// Filter for `GET /chart/{patientid}/encounters`
#[derive(Debug, Clone)]
pub struct GetPatientEncountersFilter {
    pub department_id: u32,
    pub appointment_id: Option<u32>,
    pub provider_id: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Without it only OPEN, CLOSED and REVIEW encounters come back
    pub show_all_statuses: Option<bool>,
    /// Without it only VISIT and ORDERSONLY encounters come back
    pub show_all_types: Option<bool>,
    pub show_diagnoses: Option<bool>,
    /// Defaults to 1000 on the server; this endpoint allows up to 10000
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetPatientEncountersFilter {
    pub fn new(department_id: u32) -> Self {
        Self {
            department_id,
            appointment_id: None,
            provider_id: None,
            start_date: None,
            end_date: None,
            show_all_statuses: None,
            show_all_types: None,
            show_diagnoses: None,
            limit: None,
            offset: None,
        }
    }
}

impl RequestShape for GetPatientEncountersFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| Some(f.department_id.into())),
        FieldDescriptor::new("appointmentid", |f: &Self| f.appointment_id.map(FieldValue::from)),
        FieldDescriptor::new("providerid", |f: &Self| f.provider_id.map(FieldValue::from)),
        FieldDescriptor::new("startdate", |f: &Self| f.start_date.map(FieldValue::date)),
        FieldDescriptor::new("enddate", |f: &Self| f.end_date.map(FieldValue::date)),
        FieldDescriptor::new("showallstatuses", |f: &Self| {
            f.show_all_statuses.map(FieldValue::from)
        }),
        FieldDescriptor::new("showalltypes", |f: &Self| f.show_all_types.map(FieldValue::from)),
        FieldDescriptor::new("showdiagnoses", |f: &Self| f.show_diagnoses.map(FieldValue::from)),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /departments`
#[derive(Debug, Clone, Default)]
pub struct GetDepartmentsFilter {
    /// Include departments hidden from the portal
    pub show_all_departments: Option<bool>,
    /// Include the providers of each department
    pub provider_list: Option<bool>,
    pub hospital_only: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RequestShape for GetDepartmentsFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("showalldepartments", |f: &Self| {
            f.show_all_departments.map(FieldValue::from)
        }),
        FieldDescriptor::new("providerlist", |f: &Self| f.provider_list.map(FieldValue::from)),
        FieldDescriptor::new("hospitalonly", |f: &Self| f.hospital_only.map(FieldValue::from)),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /misc/topinsurancepackages`
#[derive(Debug, Clone, Default)]
pub struct GetTopInsurancePackagesFilter {
    pub department_id: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RequestShape for GetTopInsurancePackagesFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[FieldDescriptor::new(
        "departmentid",
        |f: &Self| f.department_id.map(FieldValue::from),
    )];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /insurancepackages/common`
#[derive(Debug, Clone)]
pub struct GetCommonInsurancePackagesFilter {
    pub department_id: u32,
    pub show_only_case_policies: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl GetCommonInsurancePackagesFilter {
    pub fn new(department_id: u32) -> Self {
        Self {
            department_id,
            show_only_case_policies: None,
            limit: None,
            offset: None,
        }
    }
}

impl RequestShape for GetCommonInsurancePackagesFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[
        FieldDescriptor::new("departmentid", |f: &Self| Some(f.department_id.into())),
        FieldDescriptor::new("showonlycasepolicies", |f: &Self| {
            f.show_only_case_policies.map(FieldValue::from)
        }),
    ];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

/// Filter for `GET /reference/providertypes`
#[derive(Debug, Clone, Default)]
pub struct GetProviderTypesFilter {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl RequestShape for GetProviderTypesFilter {
    const FIELDS: &'static [FieldDescriptor<Self>] = &[];

    fn paging(&self) -> Option<Paging> {
        Some(Paging {
            limit: self.limit,
            offset: self.offset,
        })
    }
}
