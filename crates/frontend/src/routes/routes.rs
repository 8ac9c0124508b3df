use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::dashboards::FinancialSummaryDashboard;
use crate::layout::header::{Header, HeaderVariant};
use crate::system::auth::RequireAuth;
use crate::system::pages::login::LoginPage;
use crate::system::pages::not_found::NotFound;

#[component]
fn DashboardPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <FinancialSummaryDashboard />
        </RequireAuth>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <div class="app-layout">
                <Header variant=HeaderVariant::Stacked />
                <main class="app-main">
                    <Routes fallback=|| view! { <NotFound /> }>
                        <Route path=path!("/") view=|| view! { <Redirect path="/dashboard" /> } />
                        <Route path=path!("/login") view=LoginPage />
                        <Route path=path!("/dashboard") view=DashboardPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
