mod assume_role;
mod helpers;
mod send_email;
