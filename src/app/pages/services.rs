use crate::core::filter::ListFilter;
use crate::core::repository::ContentRepository;
use crate::core::ContentStore;
use crate::domain::model::Service;

pub struct ServicesPage<S: ContentStore> {
    repository: ContentRepository<S>,
    services: Vec<Service>,
    filter: ListFilter,
    loading: bool,
}

impl<S: ContentStore> ServicesPage<S> {
    pub fn new(repository: ContentRepository<S>) -> Self {
        Self {
            repository,
            services: Vec::new(),
            filter: ListFilter::default(),
            loading: true,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.services = match self.repository.list::<Service>().await {
            Ok(services) => services,
            Err(e) => {
                tracing::error!("Error loading services: {}", e);
                Vec::new()
            }
        };
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.to_string();
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn filtered(&self) -> Vec<&Service> {
        self.filter.apply(&self.services)
    }
}
