use crate::service::CheckInService;

#[derive(Clone)]
pub struct AppState {
    pub checkins: CheckInService,
}

impl AppState {
    pub fn new(checkins: CheckInService) -> Self {
        Self { checkins }
    }
}
