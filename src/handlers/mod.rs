// handlers/mod.rs - two security tiers
//
// Public (no auth): service info, categories, login/register
// Protected (bearer JWT): whoami and record CRUD under /api/*
pub mod protected;
pub mod public;
