//! Platform components and handlers most clusters install.

use harbor_components::Component;
use harbor_model::{BundleInstantiation, ComponentId, ComponentSpecification};

use super::{ContainerCluster, Draft};
use crate::error::ClusterError;

/// Binding that catches every request no other handler is bound to.
pub const ROOT_HANDLER_BINDING: &str = "*://*/";

const STATE_API_ROOT: &str = "/state/v1";
const STATE_HANDLER_CLASS: &str = "container.state.StateHandler";
const BINDINGS_OVERVIEW_HANDLER_CLASS: &str = "container.handler.BindingsOverviewHandler";
const APPLICATION_STATUS_HANDLER_CLASS: &str =
	"container.handler.observability.ApplicationStatusHandler";
const VIP_HANDLER_CLASS: &str = "container.handler.FileStatusHandler";
const STATISTICS_HANDLER_CLASS: &str = "container.config.StatisticsRequestHandler";
const MBUS_SERVER_CLASS: &str = "container.messagebus.MbusServerProvider";

/// Bundle carrying the handlers that ship with the container itself.
const CONTAINER_CORE_BUNDLE: &str = "container-core";
const METRICS_BUNDLE: &str = "simplemetrics";

const PLATFORM_COMPONENTS: &[&str] = &[
	"container.statistics.StatisticsImpl",
	"container.logging.AccessLog",
	"container.handler.threadpool.ThreadPoolProvider",
	"container.concurrent.ClassLocking",
	"container.http.filter.SecurityFilterInvoker",
	"container.language.SimpleLinguisticsProvider",
	"container.jdisc.SecretStoreProvider",
	"container.jdisc.CertificateStoreProvider",
	"container.metric.MetricConsumerProviderProvider",
	"container.metric.MetricProvider",
	"container.metric.MetricUpdater",
	"container.handler.RequestHandlerContext",
	"container.state.StateMonitor",
	"container.jdisc.ContainerThreadFactory",
	"container.protect.FreezeDetector",
	"container.slobrok.SlobrokConfigurator",
	"container.handler.VipStatus",
	"container.handler.ClustersStatus",
];

const METRICS_COMPONENTS: &[&str] = &[
	"container.metrics.simple.MetricManager",
	"container.metrics.simple.MetricsFactory",
];

const XML_PROVIDERS: &[&str] = &[
	"container.xml.providers.DatatypeFactoryProvider",
	"container.xml.providers.DocumentBuilderFactoryProvider",
	"container.xml.providers.ContextFactoryProvider",
	"container.xml.providers.SAXParserFactoryProvider",
	"container.xml.providers.SchemaFactoryProvider",
	"container.xml.providers.TransformerFactoryProvider",
	"container.xml.providers.EventFactoryProvider",
	"container.xml.providers.InputFactoryProvider",
	"container.xml.providers.OutputFactoryProvider",
	"container.xml.providers.XPathFactoryProvider",
];

const QUERY_ACCESS_LOG_CLASS: &str = "container.logging.QueryAccessLog";
const JSON_ACCESS_LOG_CLASS: &str = "container.logging.JsonAccessLog";

impl ContainerCluster<Draft> {
	/// Installs the platform components every container needs.
	pub fn add_default_components(&mut self) -> Result<(), ClusterError> {
		for class in PLATFORM_COMPONENTS.iter().chain(XML_PROVIDERS) {
			self.add_component(Component::simple_from_class(class))?;
		}
		for class in METRICS_COMPONENTS {
			self.add_component(Component::simple(BundleInstantiation::from_strings(
				ComponentId::new(*class),
				None,
				Some(METRICS_BUNDLE),
			)))?;
		}
		Ok(())
	}

	pub fn add_metric_state_handler(&mut self) -> Result<(), ClusterError> {
		let handler = Component::handler_from_class(STATE_HANDLER_CLASS).with_server_bindings([
			format!("http://*{STATE_API_ROOT}"),
			format!("https://*{STATE_API_ROOT}"),
			format!("http://*{STATE_API_ROOT}/*"),
			format!("https://*{STATE_API_ROOT}/*"),
		]);
		self.add_component(handler)
	}

	/// Adds the bindings overview on [`ROOT_HANDLER_BINDING`], unless some
	/// handler already serves it.
	pub fn add_default_root_handler(&mut self) -> Result<(), ClusterError> {
		if self.has_handler_with_binding(ROOT_HANDLER_BINDING) {
			return Ok(());
		}
		let handler = Component::handler_from_class(BINDINGS_OVERVIEW_HANDLER_CLASS)
			.with_server_bindings([ROOT_HANDLER_BINDING]);
		self.add_component(handler)
	}

	pub fn add_application_status_handler(&mut self) -> Result<(), ClusterError> {
		let handler = Component::handler(BundleInstantiation::new(
			ComponentId::new(APPLICATION_STATUS_HANDLER_CLASS),
			ComponentSpecification::new(APPLICATION_STATUS_HANDLER_CLASS),
			ComponentSpecification::new(CONTAINER_CORE_BUNDLE),
		))
		.with_server_bindings(["http://*/ApplicationStatus", "https://*/ApplicationStatus"]);
		self.add_component(handler)
	}

	pub fn add_vip_handler(&mut self) -> Result<(), ClusterError> {
		let handler = Component::handler_from_class(VIP_HANDLER_CLASS)
			.with_server_bindings(["http://*/status.html", "https://*/status.html"]);
		self.add_component(handler)
	}

	pub fn add_statistics_handler(&mut self) -> Result<(), ClusterError> {
		let handler = Component::handler_from_class(STATISTICS_HANDLER_CLASS)
			.with_server_bindings(["http://*/statistics/*", "https://*/statistics/*"]);
		self.add_component(handler)
	}

	/// Adds the message bus server feeding `chain_id`.
	pub fn add_mbus_server(&mut self, chain_id: &ComponentId) -> Result<(), ClusterError> {
		let service_id = chain_id.nest_in_namespace(&ComponentId::new("MbusServer"));
		self.add_component(Component::new(BundleInstantiation::from_strings(
			service_id,
			Some(MBUS_SERVER_CLASS),
			None,
		)))
	}

	/// Adds the query access log. Hosted clusters log structured entries.
	pub fn add_default_search_access_log(&mut self) -> Result<(), ClusterError> {
		let class = if self.hosted {
			JSON_ACCESS_LOG_CLASS
		} else {
			QUERY_ACCESS_LOG_CLASS
		};
		let cluster: ComponentId = self.name.parse()?;
		let id = ComponentId::new(class).nest_in_namespace(&cluster);
		self.add_component(Component::simple(BundleInstantiation::from_strings(
			id,
			Some(class),
			Some(CONTAINER_CORE_BUNDLE),
		)))
	}
}
