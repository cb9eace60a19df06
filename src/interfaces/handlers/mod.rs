pub mod contact;
pub mod home;
pub mod signup;
pub mod subdomain_contact;
pub mod system;
