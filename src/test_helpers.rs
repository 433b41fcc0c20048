//! Fixture builders shared by unit and integration tests.

use chrono::NaiveDate;

use crate::domain::{
    Escalation, EscalationStatus, HealthStatus, KpiSummary, Priority, Project, ProjectStatus,
    Resource, ResourceStatus, ResourceType,
};
use crate::services::DatePeriod;

pub fn sample_resource(id: i64, resource_type: ResourceType) -> Resource {
    Resource {
        id,
        employee_id: format!("EMP-{id:03}"),
        first_name: "Asha".to_string(),
        last_name: format!("Rao{id}"),
        full_name: None,
        designation: "Software Engineer".to_string(),
        department: "Delivery".to_string(),
        location: "Pune".to_string(),
        resource_type,
        status: ResourceStatus::Allocated,
        utilization_percentage: 0.0,
        bench_days: 0,
        cost_rate: 50.0,
        billing_rate: Some(90.0),
        skill_category: Some("Software Development".to_string()),
        experience_level: Some("Mid-Level".to_string()),
        years_of_experience: 3.0,
        assigned_project: Some("Phoenix".to_string()),
        available_from_date: None,
    }
}

pub fn sample_project(id: i64, status: ProjectStatus) -> Project {
    Project {
        id,
        project_code: format!("PRJ-{id:03}"),
        project_name: format!("Project {id}"),
        client_name: Some("Acme Corp".to_string()),
        project_manager: Some("Meera Iyer".to_string()),
        status,
        health_status: HealthStatus::Green,
        risk_level: Some("Low".to_string()),
        current_milestone: Some("Build".to_string()),
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-06-30".to_string()),
        planned_end_date: Some("2024-06-30".to_string()),
        sow_value: 100_000.0,
        budget_allocated: Some(90_000.0),
        actual_cost: 40_000.0,
        on_time_percentage: Some(92.0),
        utilization_rate: 85.0,
    }
}

pub fn sample_escalation(id: i64, status: EscalationStatus) -> Escalation {
    Escalation {
        id,
        title: format!("Escalation {id}"),
        description: None,
        project_id: Some(1),
        project_name: Some("Phoenix".to_string()),
        client_name: Some("Acme Corp".to_string()),
        raised_by: Some("Ravi Kumar".to_string()),
        assigned_to: None,
        priority: Priority::High,
        status,
        raised_date: Some("2024-03-01T09:00:00Z".to_string()),
        target_resolution_date: None,
        business_impact: None,
        escalation_type: None,
    }
}

pub fn sample_summary() -> KpiSummary {
    KpiSummary {
        total_resources: Some(120),
        billable_resources: Some(90),
        non_billable_resources: Some(30),
        bench_resources: Some(12),
        active_projects: Some(14),
        completed_projects: Some(6),
        at_risk_projects: Some(2),
        open_escalations: Some(3),
        total_revenue: Some(2_400_000.0),
        total_cost: Some(1_800_000.0),
        total_margin: Some(600_000.0),
        utilization_rate: Some(82.5),
        bench_percentage: Some(10.0),
        avg_bench_days: Some(18.0),
        escalation_score: Some(88),
    }
}

pub fn sample_period() -> DatePeriod {
    DatePeriod {
        start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    }
}
