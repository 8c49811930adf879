mod fixtures;
mod health;
