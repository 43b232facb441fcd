//! Admin model registry
//!
//! Declarative description of every model exposed in the admin panel: which
//! columns the list view shows, which fields are searchable, filterable,
//! read-only or hidden, and whether objects may be added or deleted.

use serde::Serialize;

use crate::admin::urls::App;

/// Admin configuration for one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelAdmin {
    pub name: &'static str,
    pub app: App,
    /// Explicit form field order; empty means all editable fields
    pub fields: Vec<&'static str>,
    pub list_display: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
    pub list_filter: Vec<&'static str>,
    pub readonly_fields: Vec<&'static str>,
    pub exclude: Vec<&'static str>,
    pub can_add: bool,
    pub can_delete: bool,
}

impl ModelAdmin {
    /// Default admin: every field editable, list shows the object's label
    pub fn new(app: App, name: &'static str) -> Self {
        Self {
            name,
            app,
            fields: Vec::new(),
            list_display: Vec::new(),
            search_fields: Vec::new(),
            list_filter: Vec::new(),
            readonly_fields: Vec::new(),
            exclude: Vec::new(),
            can_add: true,
            can_delete: true,
        }
    }

    fn fields(mut self, fields: &[&'static str]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    fn list_display(mut self, fields: &[&'static str]) -> Self {
        self.list_display = fields.to_vec();
        self
    }

    fn search_fields(mut self, fields: &[&'static str]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    fn list_filter(mut self, fields: &[&'static str]) -> Self {
        self.list_filter = fields.to_vec();
        self
    }

    fn readonly(mut self, fields: &[&'static str]) -> Self {
        self.readonly_fields = fields.to_vec();
        self
    }

    fn exclude(mut self, fields: &[&'static str]) -> Self {
        self.exclude = fields.to_vec();
        self
    }

    fn no_add(mut self) -> Self {
        self.can_add = false;
        self
    }

    fn no_delete(mut self) -> Self {
        self.can_delete = false;
        self
    }

    /// True when no option differs from the default admin
    pub fn is_default(&self) -> bool {
        *self == Self::new(self.app, self.name)
    }
}

/// Models registered with the default admin only
const DEFAULT_MODELS: &[&str] = &[
    "AccessToken",
    "AccountAuthSystem",
    "AccountFullShare",
    "Allergy",
    "AllergyExclusion",
    "AuthSystem",
    "Carenet",
    "CarenetAccount",
    "CarenetAutoshare",
    "CarenetDocument",
    "CarenetPHA",
    "DocumentRels",
    "DocumentStatusHistory",
    "Equipment",
    "Fill",
    "Immunization",
    "LabResult",
    "MachineApp",
    "Measurement",
    "Medication",
    "Message",
    "MessageAttachment",
    "Nonce",
    "Notification",
    "NoUser",
    "PHAShare",
    "Principal",
    "Problem",
    "Procedure",
    "RecordNotificationRoute",
    "ReqToken",
    "SessionRequestToken",
    "SessionToken",
    "SimpleClinicalNote",
    "VitalSigns",
];

const ACCOUNT_FIELDS: &[&str] = &[
    "full_name",
    "contact_email",
    "last_login_at",
    "last_failed_login_at",
    "total_login_count",
    "failed_login_count",
];

const ACCOUNT_SECRET_FIELDS: &[&str] = &["primary_secret", "secondary_secret"];

/// Ordered set of model admins
#[derive(Debug, Clone)]
pub struct AdminRegistry {
    models: Vec<ModelAdmin>,
}

impl AdminRegistry {
    /// Build the registry; development mode exposes account secrets in forms
    pub fn new(development_mode: bool) -> Self {
        let account_fields: Vec<&'static str> = if development_mode {
            ACCOUNT_SECRET_FIELDS
                .iter()
                .chain(ACCOUNT_FIELDS)
                .copied()
                .collect()
        } else {
            ACCOUNT_FIELDS.to_vec()
        };

        let mut models = vec![
            ModelAdmin::new(App::Indivo, "Account")
                .fields(&account_fields)
                .list_display(&["full_name", "contact_email", "state"])
                .search_fields(&["full_name", "contact_email"]),
            ModelAdmin::new(App::Indivo, "Record")
                .list_display(&["label", "external_id"])
                .search_fields(&["label"])
                .readonly(&["show_demographics_url", "id"])
                .exclude(&["demographics"]),
            ModelAdmin::new(App::Indivo, "Demographics")
                .list_display(&[
                    "name_given",
                    "name_middle",
                    "name_family",
                    "bday",
                    "adr_city",
                    "tel_2_number",
                ])
                .search_fields(&["name_family", "name_given", "name_middle"])
                .readonly(&["document_url"])
                .exclude(&["document"]),
            ModelAdmin::new(App::Indivo, "Document")
                .list_display(&["id", "fqn", "status_name"])
                .readonly(&["id"]),
            ModelAdmin::new(App::Indivo, "StatusName").list_display(&["name", "id"]),
            ModelAdmin::new(App::Indivo, "DocumentSchema")
                .list_display(&["type", "id"])
                .readonly(&["id", "schema_file", "transform_file"]),
            // Apps are installed by a management command, never through the admin
            ModelAdmin::new(App::Indivo, "PHA")
                .list_display(&["description", "type", "email", "author"])
                .readonly(&[
                    "id",
                    "creator",
                    "email",
                    "type",
                    "consumer_key",
                    "secret",
                    "name",
                    "description",
                    "author",
                    "version",
                    "indivo_version",
                    "callback_url",
                    "start_url_template",
                    "is_autonomous",
                    "autonomous_reason",
                    "has_ui",
                    "frameable",
                    "icon_url",
                    "requirements",
                ])
                .no_add()
                .no_delete(),
            ModelAdmin::new(App::Indivo, "Audit")
                .list_display(&[
                    "view_func",
                    "pha_id",
                    "datetime",
                    "effective_principal_email",
                    "record_id",
                    "document_id",
                ])
                .list_filter(&["view_func", "pha_id", "record_id"])
                .exclude(&["record_id", "document_id"])
                .readonly(&[
                    "record_id_url",
                    "document_id_url",
                    "datetime",
                    "view_func",
                    "request_successful",
                    "effective_principal_email",
                    "proxied_by_email",
                    "carenet_id",
                    "pha_id",
                    "external_id",
                    "message_id",
                    "req_url",
                    "req_ip_address",
                    "req_domain",
                    "req_headers",
                    "req_method",
                    "resp_code",
                    "resp_headers",
                ])
                .no_delete(),
            ModelAdmin::new(App::Indivo, "Encounter")
                .list_display(&[
                    "startDate",
                    "endDate",
                    "facility_name",
                    "get_provider_name",
                    "encounterType_title",
                ])
                .list_filter(&["facility_name", "encounterType_title"])
                .exclude(&["id"])
                .readonly(&["fact_url"]),
            ModelAdmin::new(App::Indivo, "Fact")
                .list_display(&["created_at", "get_document_name", "get_record_name"])
                .readonly(&["id", "created_at"]),
        ];

        models.extend(
            DEFAULT_MODELS
                .iter()
                .map(|&name| ModelAdmin::new(App::Indivo, name)),
        );

        models.push(
            ModelAdmin::new(App::CodingSystems, "CodingSystem")
                .list_display(&["short_name", "description"]),
        );
        models.push(
            ModelAdmin::new(App::CodingSystems, "CodedValue")
                .list_display(&[
                    "get_system_name",
                    "code",
                    "physician_value",
                    "consumer_value",
                    "umls_code",
                ])
                .search_fields(&[
                    "code",
                    "abbreviation",
                    "physician_value",
                    "consumer_value",
                    "umls_code",
                ])
                .list_filter(&["system__short_name"]),
        );

        Self { models }
    }

    /// Look up a model admin by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&ModelAdmin> {
        self.models
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelAdmin> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
