pub mod induction;
