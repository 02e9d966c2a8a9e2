use crate::location::Resolver;

pub struct AppState {
    pub resolver: Resolver,
}
