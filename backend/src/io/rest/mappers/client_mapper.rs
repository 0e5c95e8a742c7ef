//! Conversions between the client and visit DTOs of `shared` and the domain layer.

use crate::domain::commands::clients::{ClientCommand, ClientListQuery, RecordVisitCommand};
use crate::domain::models::{Client as DomainClient, Visit as DomainVisit};
use shared::{
    Client as SharedClient, ClientListQuery as SharedClientListQuery, ClientRequest,
    RecordVisitRequest, Visit as SharedVisit, VisitHistoryItem,
};

/// Mapper to convert between shared client DTOs and domain client models.
pub struct ClientMapper;

impl ClientMapper {
    pub fn to_dto(domain: DomainClient) -> SharedClient {
        SharedClient {
            id: domain.id,
            first_name: domain.first_name,
            last_name: domain.last_name,
            email: domain.email,
            phone: domain.phone,
        }
    }

    pub fn to_dto_list(domain: Vec<DomainClient>) -> Vec<SharedClient> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: ClientRequest) -> ClientCommand {
        ClientCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
        }
    }

    pub fn to_list_query(query: SharedClientListQuery) -> ClientListQuery {
        ClientListQuery {
            first_name: query.first_name,
            last_name: query.last_name,
        }
    }

    pub fn to_visit_dto(domain: DomainVisit) -> SharedVisit {
        SharedVisit {
            id: domain.id,
            client_id: domain.client_id,
            bath_id: domain.bath_id,
            visited_at: shared::format_timestamp(&domain.visited_at),
        }
    }

    pub fn to_history_item(domain: DomainVisit) -> VisitHistoryItem {
        VisitHistoryItem {
            id: domain.id,
            bath_id: domain.bath_id,
            visited_at: shared::format_timestamp(&domain.visited_at),
        }
    }

    pub fn to_history(domain: Vec<DomainVisit>) -> Vec<VisitHistoryItem> {
        domain.into_iter().map(Self::to_history_item).collect()
    }

    /// `visitedAt` is passed through as text; the service parses it once the
    /// client is known to exist.
    pub fn to_visit_command(request: RecordVisitRequest) -> RecordVisitCommand {
        RecordVisitCommand {
            bath_id: request.bath_id,
            visited_at: request.visited_at,
        }
    }
}
