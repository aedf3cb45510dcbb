//! SOAP markup serialization driven by per-entity schema tables.
//!
//! Every entity that can appear in a SOAP body declares a schema: an ordered
//! table mapping each field tag to a namespace binding and an accessor. A
//! generic driver walks the table and emits one namespaced element per
//! non-null field. Overflow fields are never part of a schema, so they never
//! reach the markup output.
//!
//! The same field can live in a different namespace depending on which
//! backend service the request targets; [`SoapService`] selects the variant
//! and [`NsBinding`] describes how a field resolves against it.

use xmltree::{Element, EmitterConfig, Namespace, XMLNode};

use crate::{
    entity::soap::Security,
    error::Result,
};

/// SOAP envelope namespace.
pub const ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// Envelope namespace used by the oldest service generation, seen in legacy
/// fault responses.
pub const OLD_ENVELOPE_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";
/// Namespace of the shared CIF error structures.
pub const COMMON_NAMESPACE: &str = "http://postnl.nl/cif/services/common/";
/// XML Schema instance namespace.
pub const XML_SCHEMA_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// WS-Security extension namespace.
pub const SECURITY_NAMESPACE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

/// The backend service a request is being serialized for.
///
/// Selects which namespace variant of a field applies during markup
/// serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoapService {
    /// The barcode web service.
    Barcode,
    /// The confirming (pre-alert) web service.
    Confirming,
    /// The labelling web service.
    Labelling,
}

impl SoapService {
    /// Namespace of the service's domain types.
    #[must_use]
    pub fn domain_namespace(self) -> &'static str {
        match self {
            Self::Barcode => "http://postnl.nl/cif/domain/BarcodeWebService/",
            Self::Confirming => "http://postnl.nl/cif/domain/ConfirmingWebService/",
            Self::Labelling => "http://postnl.nl/cif/domain/LabellingWebService/",
        }
    }

    /// Namespace of the service's operation elements.
    #[must_use]
    pub fn services_namespace(self) -> &'static str {
        match self {
            Self::Barcode => "http://postnl.nl/cif/services/BarcodeWebService/",
            Self::Confirming => "http://postnl.nl/cif/services/ConfirmingWebService/",
            Self::Labelling => "http://postnl.nl/cif/services/LabellingWebService/",
        }
    }
}

/// How a field's tag resolves to a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NsBinding {
    /// Same tag in every backend; no namespace.
    None,
    /// The domain namespace of the current backend service.
    Domain,
    /// The fixed WS-Security namespace.
    Security,
}

impl NsBinding {
    /// Resolves the binding against the current backend service.
    #[must_use]
    pub fn resolve(self, service: SoapService) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Domain => Some(service.domain_namespace()),
            Self::Security => Some(SECURITY_NAMESPACE),
        }
    }
}

/// A rendered field value.
#[derive(Debug, Clone)]
pub enum MarkupValue {
    /// Plain text content.
    Text(String),
    /// A nested entity; its children go under the field's tag.
    Entity(Vec<Element>),
    /// Repeated same-named children nested one level under the field's tag,
    /// e.g. `<Shipments><Shipment>…</Shipment>…</Shipments>`.
    List {
        /// Tag of each repeated child element.
        item_tag: &'static str,
        /// Children of each repeated element, in order.
        items: Vec<Vec<Element>>,
    },
}

/// One entry of an entity's markup schema.
#[derive(Debug)]
pub struct FieldDef<E> {
    /// Element tag of the field.
    pub tag: &'static str,
    /// Namespace binding of the field.
    pub binding: NsBinding,
    /// Accessor producing the field's value, or `None` when the field is
    /// unset and must be omitted.
    pub value: fn(&E, SoapService) -> Option<MarkupValue>,
}

/// An entity that can serialize itself into SOAP markup.
pub trait MarkupEntity: Sized + 'static {
    /// The ordered field table driving serialization.
    fn schema() -> &'static [FieldDef<Self>];

    /// Renders the entity's non-null fields as child elements.
    fn markup_children(&self, service: SoapService) -> Vec<Element> {
        render_children(self, service)
    }
}

/// Accessor helper for plain optional text fields.
pub(crate) fn text(field: &Option<String>) -> Option<MarkupValue> {
    field.clone().map(MarkupValue::Text)
}

/// Builds an element with the prefix registered for its namespace.
pub(crate) fn named_element(
    tag: &str,
    namespace: Option<&'static str>,
    service: SoapService,
) -> Element {
    let mut element = Element::new(tag);
    if let Some(ns) = namespace {
        element.prefix = prefix_for(ns, service).map(str::to_owned);
        element.namespace = Some(ns.to_owned());
    }
    element
}

/// Renders an entity's schema into child elements, skipping unset fields.
pub fn render_children<E: MarkupEntity + 'static>(entity: &E, service: SoapService) -> Vec<Element> {
    let mut children = Vec::new();
    for def in E::schema() {
        let Some(value) = (def.value)(entity, service) else {
            continue;
        };
        let namespace = def.binding.resolve(service);
        let mut element = named_element(def.tag, namespace, service);
        match value {
            MarkupValue::Text(content) => {
                element.children.push(XMLNode::Text(content));
            }
            MarkupValue::Entity(nested) => {
                element.children.extend(nested.into_iter().map(XMLNode::Element));
            }
            MarkupValue::List { item_tag, items } => {
                for item in items {
                    let mut child = named_element(item_tag, namespace, service);
                    child.children.extend(item.into_iter().map(XMLNode::Element));
                    element.children.push(XMLNode::Element(child));
                }
            }
        }
        children.push(element);
    }
    children
}

/// Prefix map declared on every request envelope.
fn namespace_bindings(service: SoapService) -> [(&'static str, &'static str); 6] {
    [
        ("SOAP-ENV", ENVELOPE_NAMESPACE),
        ("bar", service.services_namespace()),
        ("bar1", service.domain_namespace()),
        ("wsse", SECURITY_NAMESPACE),
        ("i", XML_SCHEMA_NAMESPACE),
        ("ns0", COMMON_NAMESPACE),
    ]
}

/// Resolves the registered prefix for a namespace, if any.
pub(crate) fn prefix_for(namespace: &str, service: SoapService) -> Option<&'static str> {
    namespace_bindings(service)
        .iter()
        .find(|(_, ns)| *ns == namespace)
        .map(|(prefix, _)| *prefix)
}

/// Serializes a complete request envelope for one operation.
///
/// The envelope wraps the security header and the operation body:
///
/// ```text
/// <SOAP-ENV:Envelope xmlns:…>
///   <SOAP-ENV:Header>
///     <wsse:Security>…</wsse:Security>
///   </SOAP-ENV:Header>
///   <SOAP-ENV:Body>
///     <bar:{operation}>…</bar:{operation}>
///   </SOAP-ENV:Body>
/// </SOAP-ENV:Envelope>
/// ```
///
/// # Errors
///
/// Returns [`crate::CifError::XmlWrite`] if emitting the document fails.
pub fn write_envelope<E: MarkupEntity>(
    service: SoapService,
    operation: &str,
    body: &E,
    security: &Security,
) -> Result<String> {
    let mut envelope = named_element("Envelope", Some(ENVELOPE_NAMESPACE), service);
    let mut namespaces = Namespace::empty();
    for (prefix, namespace) in namespace_bindings(service) {
        namespaces.put(prefix, namespace);
    }
    envelope.namespaces = Some(namespaces);

    let mut header = named_element("Header", Some(ENVELOPE_NAMESPACE), service);
    let mut security_element = named_element("Security", Some(SECURITY_NAMESPACE), service);
    security_element
        .children
        .extend(security.markup_children(service).into_iter().map(XMLNode::Element));
    header.children.push(XMLNode::Element(security_element));

    let mut soap_body = named_element("Body", Some(ENVELOPE_NAMESPACE), service);
    let mut operation_element =
        named_element(operation, Some(service.services_namespace()), service);
    operation_element
        .children
        .extend(body.markup_children(service).into_iter().map(XMLNode::Element));
    soap_body.children.push(XMLNode::Element(operation_element));

    envelope.children.push(XMLNode::Element(header));
    envelope.children.push(XMLNode::Element(soap_body));

    let mut buffer = Vec::new();
    envelope.write_with_config(&mut buffer, EmitterConfig::new().perform_indent(true))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
