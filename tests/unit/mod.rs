mod auth;
mod leaderboard;
mod progression;
mod quiz;
mod roadmap;
