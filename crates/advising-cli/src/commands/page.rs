use advising_application::pages::{
    LecturerDashboardPage, LecturerProfilePage, ResourcesPage, StudentCoursesPage,
    StudentProfilePage, StudentResultsPage,
};
use advising_application::PageError;
use anyhow::Result;

use super::Client;

pub async fn resources(client: &Client, category: Option<String>) -> Result<()> {
    let page = ResourcesPage::new(client.ctx());
    let result = async {
        page.load().await?;
        if let Some(category) = category {
            page.select_category(&category).await?;
        }
        Ok::<_, PageError>(())
    }
    .await;
    client.finish(result).await
}

pub async fn lecturer_dashboard(
    client: &Client,
    results: Option<String>,
    notes: Option<String>,
    details: Option<String>,
) -> Result<()> {
    let page = LecturerDashboardPage::new(client.ctx());
    let result = async {
        page.load().await?;
        if let Some(id) = details {
            page.open_details(&id).await?;
        }
        if let Some(id) = results {
            page.view_results(&id).await?;
        }
        if let Some(id) = notes {
            page.view_notes(&id).await?;
        }
        Ok::<_, PageError>(())
    }
    .await;
    client.finish(result).await
}

pub async fn lecturer_profile(client: &Client) -> Result<()> {
    let page = LecturerProfilePage::new(client.ctx());
    client.finish(page.load().await).await
}

pub async fn student_courses(client: &Client) -> Result<()> {
    let page = StudentCoursesPage::new(client.ctx());
    client.finish(page.load().await).await
}

pub async fn student_profile(client: &Client) -> Result<()> {
    let page = StudentProfilePage::new(client.ctx());
    client.finish(page.load().await).await
}

pub async fn student_results(client: &Client) -> Result<()> {
    let page = StudentResultsPage::new(client.ctx());
    client.finish(page.load().await).await
}
