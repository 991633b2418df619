// Tool catalog: one entry per MTM endpoint

use serde_json::{json, Value};

/// Kind of a query parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Str,
    Int,
    Bool,
}

/// Literal default value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(u64),
    Str(&'static str),
}

impl Literal {
    pub fn to_json(self) -> Value {
        match self {
            Literal::Int(n) => json!(n),
            Literal::Str(s) => json!(s),
        }
    }

    pub fn to_query_value(self) -> String {
        match self {
            Literal::Int(n) => n.to_string(),
            Literal::Str(s) => s.to_string(),
        }
    }
}

/// How a parameter default is treated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    /// Omitted from the query when absent
    None,
    /// Shown in the schema, but the upstream default applies when absent
    Advertised(Literal),
    /// Always sent; this value is used when absent
    Sent(Literal),
}

/// Query parameter definition
#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub fallback: Fallback,
}

/// Path identifier definition
#[derive(Debug, Clone, Copy)]
pub struct IdParam {
    pub name: &'static str,
    /// Alternative spellings accepted from callers
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

/// A single tool backed by one GET endpoint
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Path under the service root; `{id}` is replaced by the identifier
    pub path: &'static str,
    pub id: Option<IdParam>,
    pub params: &'static [Param],
    pub output_schema: Option<fn() -> Value>,
}

const fn str_param(name: &'static str, description: &'static str) -> Param {
    Param {
        name,
        kind: ParamKind::Str,
        description,
        fallback: Fallback::None,
    }
}

const fn id(
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> Option<IdParam> {
    Some(IdParam {
        name,
        aliases,
        description,
    })
}

const PAGE_DESC: &str = "The page number to access (1 indexed, defaults to 1)";
const SORT_DESC: &str = "Comma-separated list of sorting (optional)";
const SINCE_DESC: &str = "ISO 8601 formatted date to fetch events from";

const fn page(fallback: Fallback) -> Param {
    Param {
        name: "page",
        kind: ParamKind::Int,
        description: PAGE_DESC,
        fallback,
    }
}

const fn size(description: &'static str, fallback: Fallback) -> Param {
    Param {
        name: "size",
        kind: ParamKind::Int,
        description,
        fallback,
    }
}

const fn sort(fallback: Fallback) -> Param {
    Param {
        name: "sort",
        kind: ParamKind::Str,
        description: SORT_DESC,
        fallback,
    }
}

const ADV_PAGE: Fallback = Fallback::Advertised(Literal::Int(1));
const ADV_SIZE_30: Fallback = Fallback::Advertised(Literal::Int(30));
const ADV_SORT: Fallback = Fallback::Advertised(Literal::Str(""));
const SENT_PAGE: Fallback = Fallback::Sent(Literal::Int(1));
const SENT_SIZE_30: Fallback = Fallback::Sent(Literal::Int(30));
const SENT_SIZE_100: Fallback = Fallback::Sent(Literal::Int(100));

const SIZE_30_DESC: &str = "The page size requested (defaults to 30, max 100)";
const SIZE_100_DESC: &str = "The page size requested (defaults to 100, max 100)";

const EVENT_FEED_PARAMS: &[Param] = &[
    str_param("since", SINCE_DESC),
    page(SENT_PAGE),
    size(SIZE_100_DESC, SENT_SIZE_100),
    sort(Fallback::None),
];

/// All tools exposed by the server
pub const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "get_accounts",
        description: "List or search all accounts with pagination support.",
        path: "/accounts",
        id: None,
        params: &[
            str_param("q", "A part of the name to search for"),
            page(SENT_PAGE),
            size(SIZE_30_DESC, SENT_SIZE_30),
            sort(ADV_SORT),
        ],
        output_schema: Some(accounts_output),
    },
    ToolSpec {
        name: "get_account",
        description: "Retrieve a single account by its UUID.",
        path: "/accounts/{id}",
        id: id("id", &["account_id"], "Account UUID"),
        params: &[],
        output_schema: Some(account_output),
    },
    ToolSpec {
        name: "get_workspaces",
        description:
            "List all workspaces for the requesting user with filtering and pagination support.",
        path: "/workspaces",
        id: None,
        params: &[
            str_param("q", "Search query"),
            str_param("feature", "Feature Flag Filter"),
            page(ADV_PAGE),
            size(SIZE_30_DESC, ADV_SIZE_30),
            sort(Fallback::Advertised(Literal::Str("id-asc"))),
            str_param("labels", "Comma-separated list of label ids"),
        ],
        output_schema: Some(workspaces_output),
    },
    ToolSpec {
        name: "get_workspace",
        description: "Retrieve a single workspace by its UUID.",
        path: "/workspaces/{id}",
        id: id("id", &["workspace_id"], "Workspace UUID"),
        params: &[],
        output_schema: Some(workspace_output),
    },
    ToolSpec {
        name: "get_users",
        description: "List or search all users with pagination support.",
        path: "/users",
        id: None,
        params: &[
            str_param("email", "Search by email address (optional)"),
            str_param("userName", "Search by userName address (optional)"),
            str_param("q", "Search in user name or name (optional)"),
            page(ADV_PAGE),
            size(SIZE_30_DESC, ADV_SIZE_30),
            sort(ADV_SORT),
        ],
        output_schema: Some(users_output),
    },
    ToolSpec {
        name: "get_user",
        description: "Retrieve a single user by their UUID.",
        path: "/users/{id}",
        id: id("id", &["user_id"], "User UUID"),
        params: &[Param {
            name: "returnSinglePermission",
            kind: ParamKind::Bool,
            description:
                "If true returns only the permission for the workspace of the auth user",
            fallback: Fallback::None,
        }],
        output_schema: Some(user_output),
    },
    ToolSpec {
        name: "get_permissions",
        description: "List user permissions with extensive filtering and pagination support.",
        path: "/permissions",
        id: None,
        params: &[
            str_param("userId", "User UUID"),
            str_param("workspaceId", "Workspace UUID"),
            str_param("q", "Query string to search the related user"),
            str_param(
                "email",
                "Email to search for, may also be a comma separated list of emails",
            ),
            str_param("status", "Optional status to search for"),
            page(ADV_PAGE),
            size(
                "The page size requested (defaults to 50, max 100)",
                Fallback::Advertised(Literal::Int(50)),
            ),
            sort(ADV_SORT),
        ],
        output_schema: Some(permissions_output),
    },
    ToolSpec {
        name: "get_permission",
        description: "Retrieve a single permission by its UUID.",
        path: "/permissions/{id}",
        id: id("id", &["permission_id"], "Permission UUID"),
        params: &[],
        output_schema: Some(permission_output),
    },
    ToolSpec {
        name: "get_contracts",
        description: "List all contracts with search and pagination support.",
        path: "/contracts",
        id: None,
        params: &[
            str_param("q", "Search for account, type or status"),
            page(ADV_PAGE),
            size(SIZE_30_DESC, ADV_SIZE_30),
            sort(ADV_SORT),
        ],
        output_schema: Some(contracts_output),
    },
    ToolSpec {
        name: "get_contract",
        description: "Retrieve a single contract by its UUID.",
        path: "/contracts/{id}",
        id: id("id", &["contract_id"], "Contract UUID"),
        params: &[],
        output_schema: Some(contract_output),
    },
    ToolSpec {
        name: "get_instances",
        description: "List all instances with filtering and pagination support.",
        path: "/instances",
        id: None,
        params: &[
            str_param("q", "A part of the name or URL to search for"),
            page(SENT_PAGE),
            size(SIZE_30_DESC, SENT_SIZE_30),
            sort(ADV_SORT),
            str_param("application", "Comma separated list of application names"),
            str_param("url", "URL"),
        ],
        output_schema: Some(instances_output),
    },
    ToolSpec {
        name: "get_events",
        description: "Retrieve all events for the requesting user with pagination support.",
        path: "/events",
        id: None,
        params: &[
            str_param("since", SINCE_DESC),
            page(ADV_PAGE),
            size(SIZE_100_DESC, Fallback::Advertised(Literal::Int(100))),
            sort(ADV_SORT),
        ],
        output_schema: Some(events_output),
    },
    ToolSpec {
        name: "get_technical_users",
        description: "List or search all technical users with pagination support.",
        path: "/technicalusers",
        id: None,
        params: &[
            page(SENT_PAGE),
            size(SIZE_30_DESC, SENT_SIZE_30),
            str_param("queryUserName", "Search in technical user name (optional)"),
            sort(Fallback::Sent(Literal::Str("userName-ASC"))),
            str_param(
                "workspaceId",
                "The id of the workspace the technical user belong to",
            ),
        ],
        output_schema: Some(technical_users_output),
    },
    ToolSpec {
        name: "get_instance",
        description: "Retrieve a single instance by its UUID.",
        path: "/instances/{id}",
        id: id("id", &["instance_id"], "Instance UUID"),
        params: &[],
        output_schema: None,
    },
    ToolSpec {
        name: "get_event",
        description: "Retrieve a single event by its UUID.",
        path: "/events/{id}",
        id: id("id", &["event_id"], "Event UUID"),
        params: &[],
        output_schema: None,
    },
    ToolSpec {
        name: "get_technical_user",
        description: "Retrieve a single technical user by its UUID.",
        path: "/technicalusers/{id}",
        id: id("id", &["technical_user_id"], "Technical user UUID"),
        params: &[str_param(
            "workspaceId",
            "The id of the workspace the technical user belongs to",
        )],
        output_schema: None,
    },
    ToolSpec {
        name: "get_domains",
        description: "List all domains with filtering and pagination support.",
        path: "/domains",
        id: None,
        params: &[
            str_param("q", "Search query"),
            str_param("FQDN", "Fully qualified domain name"),
            str_param("instance", "Instance UUID"),
            page(ADV_PAGE),
            size(SIZE_30_DESC, ADV_SIZE_30),
            sort(ADV_SORT),
        ],
        output_schema: None,
    },
    ToolSpec {
        name: "get_domain",
        description: "Retrieve a single domain by its UUID.",
        path: "/domains/{id}",
        id: id("domain_id", &["id"], "Domain UUID"),
        params: &[],
        output_schema: None,
    },
    ToolSpec {
        name: "get_identity_providers",
        description: "List identity providers with filtering and pagination support.",
        path: "/identityProviders",
        id: None,
        params: &[
            str_param("q", "Search query"),
            str_param("entityID", "SAML entity ID"),
            str_param("accountID", "Account UUID"),
            str_param("serviceProvider", "Service provider"),
            str_param("idmType", "Identity management type"),
            page(ADV_PAGE),
            size(SIZE_30_DESC, ADV_SIZE_30),
            sort(ADV_SORT),
        ],
        output_schema: None,
    },
    ToolSpec {
        name: "get_identity_provider",
        description: "Retrieve a single identity provider by its UUID.",
        path: "/identityProviders/{id}",
        id: id("id", &["identity_provider_id"], "Identity provider UUID"),
        params: &[],
        output_schema: None,
    },
    ToolSpec {
        name: "get_custom_features",
        description: "List custom features, optionally filtered by contract or workspace.",
        path: "/customFeatures",
        id: None,
        params: &[
            str_param("contractId", "Contract UUID"),
            str_param("workspaceId", "Workspace UUID"),
        ],
        output_schema: None,
    },
    ToolSpec {
        name: "get_custom_feature",
        description: "Retrieve a single custom feature by its UUID.",
        path: "/customFeatures/{id}",
        id: id("custom_feature_id", &["id"], "Custom feature UUID"),
        params: &[],
        output_schema: None,
    },
    ToolSpec {
        name: "get_labels",
        description: "List labels, optionally filtered by name.",
        path: "/labels",
        id: None,
        params: &[str_param("name", "Label name")],
        output_schema: None,
    },
    ToolSpec {
        name: "get_labels_by_workspace",
        description: "List the labels assigned to a workspace.",
        path: "/labels/workspaces/{id}/labels",
        id: id("workspaceId", &["workspace_id", "id"], "Workspace UUID"),
        params: &[],
        output_schema: None,
    },
    ToolSpec {
        name: "get_account_events",
        description: "Retrieve the events of an account with pagination support.",
        path: "/accounts/{id}/events",
        id: id("account_id", &["id"], "Account UUID"),
        params: EVENT_FEED_PARAMS,
        output_schema: Some(events_output),
    },
    ToolSpec {
        name: "get_workspace_events",
        description: "Retrieve the events of a workspace with pagination support.",
        path: "/workspaces/{id}/events",
        id: id("workspace_id", &["id"], "Workspace UUID"),
        params: &[
            str_param("since", SINCE_DESC),
            page(SENT_PAGE),
            size(SIZE_100_DESC, SENT_SIZE_100),
            sort(Fallback::None),
            str_param("eventType", "Only return events of this type"),
        ],
        output_schema: Some(events_output),
    },
    ToolSpec {
        name: "get_user_events",
        description: "Retrieve the events of a user with pagination support.",
        path: "/users/{id}/events",
        id: id("user_id", &["id"], "User UUID"),
        params: EVENT_FEED_PARAMS,
        output_schema: Some(events_output),
    },
    ToolSpec {
        name: "get_contract_events",
        description: "Retrieve the events of a contract with pagination support.",
        path: "/contracts/{id}/events",
        id: id("contract_id", &["id"], "Contract UUID"),
        params: EVENT_FEED_PARAMS,
        output_schema: Some(events_output),
    },
    ToolSpec {
        name: "get_instance_events",
        description: "Retrieve the events of an instance with pagination support.",
        path: "/instances/{id}/events",
        id: id("instance_id", &["id"], "Instance UUID"),
        params: EVENT_FEED_PARAMS,
        output_schema: Some(events_output),
    },
    ToolSpec {
        name: "get_identity_provider_events",
        description: "Retrieve the events of an identity provider with pagination support.",
        path: "/identityProviders/{id}/events",
        id: id("identity_provider_id", &["id"], "Identity provider UUID"),
        params: EVENT_FEED_PARAMS,
        output_schema: Some(events_output),
    },
];

/// Look up a tool by name
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

impl ToolSpec {
    /// JSON schema for the tool arguments
    pub fn input_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        if let Some(id) = self.id {
            properties.insert(
                id.name.to_string(),
                json!({"type": "string", "description": id.description}),
            );
            required.push(id.name);
        }

        for param in self.params {
            let kind = match param.kind {
                ParamKind::Str => "string",
                ParamKind::Int => "number",
                ParamKind::Bool => "boolean",
            };
            let mut schema = json!({"type": kind, "description": param.description});
            match param.fallback {
                Fallback::Advertised(lit) | Fallback::Sent(lit) => {
                    schema["default"] = lit.to_json();
                }
                Fallback::None => {}
            }
            properties.insert(param.name.to_string(), schema);
        }

        let mut schema = json!({"type": "object", "properties": properties});
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }
}

// ---------------------------------------------------------------------------
// Output schemas
// ---------------------------------------------------------------------------

fn envelope(data: Value, with_total: bool) -> Value {
    let mut properties = json!({
        "status": {
            "type": "string",
            "enum": ["OK", "ERROR"],
            "description": "Response status"
        },
        "type": {"type": "string", "description": "Response type"},
        "message": {"type": "string", "description": "Response message"},
        "errors": {
            "type": "array",
            "items": {"type": "object", "description": "API error details"},
            "description": "Array of errors if status is ERROR"
        },
        "data": data
    });
    if with_total {
        properties["total"] = json!({
            "type": "number",
            "format": "int64",
            "description": "Total number of items matching the query"
        });
    }
    json!({"type": "object", "properties": properties})
}

fn list_of(item: Value) -> Value {
    envelope(json!({"type": "array", "items": item}), true)
}

fn single(item: Value) -> Value {
    envelope(item, false)
}

fn uuid(description: &str) -> Value {
    json!({"type": "string", "format": "uuid", "description": description})
}

fn links() -> Value {
    json!({"type": "array", "items": {"type": "object"}, "description": "Related links"})
}

fn account_item() -> Value {
    json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "id": uuid("Account UUID"),
            "name": {"type": "string", "minLength": 2, "maxLength": 128, "description": "Account name"},
            "fromAddress": {"type": "string", "format": "email", "description": "From email address"},
            "aiAvailable": {"type": "boolean", "description": "Whether AI features are available"},
            "sapCrmId": {"type": "string", "description": "SAP CRM ID"},
            "sapPaperCustomer": {"type": "boolean", "description": "SAP paper customer flag"},
            "sapAiUnitsAvailable": {"type": "boolean", "description": "SAP AI units available flag"},
            "passwordPolicy": {"type": "string", "enum": ["NORMAL", "STRICT"], "description": "Password policy type"},
            "responsibleUser": {"type": "object", "description": "Responsible user object"},
            "links": links()
        }
    })
}

fn workspace_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": uuid("Workspace UUID"),
            "name": {"type": "string", "description": "Workspace name"},
            "contract": {"type": "object", "description": "Contract the workspace belongs to"},
            "instance": {"type": "object", "description": "Instance hosting the workspace"},
            "domain": {"type": "object", "description": "Workspace domain"},
            "featureBundleId": {"type": "string", "description": "Feature bundle ID"},
            "status": {"type": "string", "enum": ["ACTIVE", "BLOCKED"], "description": "Workspace status"},
            "type": {"type": "string", "enum": ["LIVE", "DEMO", "SANDBOX"], "description": "Workspace type"},
            "product": {"type": "string", "enum": ["EAM", "VSM", "SMP"], "description": "Product"},
            "defaultRole": {"type": "string", "description": "Default role for new users"},
            "comment": {"type": "string", "description": "Comment"},
            "createdAt": {"type": "string", "format": "date-time", "description": "Creation timestamp"},
            "invitationOnly": {"type": "boolean", "description": "Invitation only flag"},
            "allowTransientUsers": {"type": "boolean", "description": "Transient users allowed"},
            "sapTenantId": {"type": "number", "format": "int64", "description": "SAP tenant ID"},
            "managedBy": uuid("Managing workspace UUID"),
            "identityManagement": {"type": "string", "description": "Identity management mode"},
            "active": {"type": "boolean", "description": "Whether the workspace is active"},
            "url": {"type": "string", "description": "Workspace URL"},
            "links": links()
        }
    })
}

fn user_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": uuid("User UUID"),
            "account": {"type": "object", "description": "Account of the user"},
            "userName": {"type": "string", "format": "email", "description": "User name"},
            "email": {"type": "string", "format": "email", "description": "Email address"},
            "firstName": {"type": "string", "description": "First name"},
            "lastName": {"type": "string", "description": "Last name"},
            "department": {"type": "string", "description": "Department"},
            "lastLogin": {"type": "string", "format": "date-time", "description": "Last login"},
            "role": {"type": "string", "description": "Account role (e.g. SUPERADMIN, ACCOUNTADMIN, USER)"},
            "status": {"type": "string", "enum": ["ACTIVE", "ARCHIVED"], "description": "User status"},
            "technicalUser": {"type": "boolean", "description": "Whether this is a technical user"},
            "scimManaged": {"type": "boolean", "description": "Managed through SCIM"},
            "permissions": {"type": "array", "items": {"type": "object"}, "description": "Workspace permissions"},
            "active": {"type": "boolean", "description": "Whether the user is active"},
            "displayName": {"type": "string", "description": "Display name"},
            "links": links()
        }
    })
}

fn permission_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": uuid("Permission UUID"),
            "workspaceId": uuid("Workspace UUID"),
            "role": {"type": "string", "description": "Workspace role"},
            "status": {"type": "string", "description": "Permission status"},
            "user": {"type": "object", "description": "User the permission belongs to"},
            "workspace": {"type": "object", "description": "Workspace the permission grants access to"},
            "lastLogin": {"type": "string", "format": "date-time", "description": "Last login"},
            "customerRoles": {"type": "string", "description": "Customer roles"},
            "accessControlEntities": {"type": "string", "description": "Access control entities"},
            "active": {"type": "boolean", "description": "Whether the permission is active"},
            "links": links()
        }
    })
}

fn contract_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": uuid("Contract UUID"),
            "featureBundleId": {"type": "string", "description": "Feature bundle ID"},
            "startDate": {"type": "string", "format": "date-time", "description": "Start date"},
            "endDate": {"type": "string", "format": "date-time", "description": "End date"},
            "type": {"type": "string", "enum": ["REGULAR", "TRIAL"], "description": "Contract type"},
            "status": {"type": "string", "enum": ["ACTIVE", "BLOCKED"], "description": "Contract status"},
            "comment": {"type": "string", "description": "Comment"},
            "account": {"type": "object", "description": "Account of the contract"},
            "application": {"type": "object", "description": "Application of the contract"},
            "active": {"type": "boolean", "description": "Whether the contract is active"},
            "displayName": {"type": "string", "description": "Display name"},
            "links": links()
        }
    })
}

fn instance_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": uuid("Instance UUID"),
            "name": {"type": "string", "description": "Instance name"},
            "url": {"type": "string", "description": "Instance URL"},
            "identityManagement": {"type": "string", "description": "Identity management mode"},
            "isDefault": {"type": "boolean", "description": "Default instance flag"},
            "isPrimary": {"type": "boolean", "description": "Primary instance flag"},
            "application": {"type": "object", "description": "Application"},
            "account": {"type": "object", "description": "Account"},
            "identityProvider": {"type": "object", "description": "Identity provider"},
            "type": {"type": "string", "enum": ["DEMO", "PROD"], "description": "Instance type"},
            "links": links()
        }
    })
}

fn event_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": uuid("Event UUID"),
            "type": {"type": "string", "description": "Event type"},
            "application": {"type": "string", "description": "Emitting application"},
            "version": {"type": "string", "description": "Event version"},
            "status": {"type": "string", "enum": ["STARTED", "FINISHED"], "description": "Event status"},
            "createdAt": {"type": "string", "format": "date-time", "description": "Creation timestamp"},
            "finishedAt": {"type": "string", "format": "date-time", "description": "Completion timestamp"},
            "actor": {"type": "object", "description": "Actor that triggered the event"},
            "account": {"type": "object", "description": "Related account"},
            "user": {"type": "object", "description": "Related user"},
            "workspace": {"type": "object", "description": "Related workspace"},
            "payload": {"type": "object", "description": "Event payload"},
            "links": links()
        }
    })
}

fn technical_user_item() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": uuid("Technical user UUID"),
            "userName": {"type": "string", "description": "Technical user name"},
            "email": {"type": "string", "description": "Email address"},
            "permissionRole": {"type": "string", "description": "Workspace role"},
            "customerRoles": {"type": "string", "description": "Customer roles"},
            "accessControlEntities": {"type": "string", "description": "Access control entities"},
            "apiTokenData": {
                "type": "object",
                "description": "API token metadata",
                "properties": {
                    "id": uuid("API token UUID"),
                    "description": {"type": "string", "description": "Token description"},
                    "expiry": {"type": "object", "description": "Token expiry"}
                }
            },
            "accountId": uuid("Account UUID"),
            "workspaceId": uuid("Workspace UUID")
        }
    })
}

fn accounts_output() -> Value {
    list_of(account_item())
}

fn account_output() -> Value {
    single(account_item())
}

fn workspaces_output() -> Value {
    list_of(workspace_item())
}

fn workspace_output() -> Value {
    single(workspace_item())
}

fn users_output() -> Value {
    list_of(user_item())
}

fn user_output() -> Value {
    single(user_item())
}

fn permissions_output() -> Value {
    list_of(permission_item())
}

fn permission_output() -> Value {
    single(permission_item())
}

fn contracts_output() -> Value {
    list_of(contract_item())
}

fn contract_output() -> Value {
    single(contract_item())
}

fn instances_output() -> Value {
    list_of(instance_item())
}

fn events_output() -> Value {
    list_of(event_item())
}

fn technical_users_output() -> Value {
    list_of(technical_user_item())
}
