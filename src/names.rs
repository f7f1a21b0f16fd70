//! Synthetic reviewer/asker identity pools, keyed by region.
//!
//! Pools exist for the regions the source data covers; regions without a
//! dedicated pool (marathi, bengali, gujarati) fall back to the general
//! pool. First names are drawn without replacement per batch; once a pool
//! is exhausted a random two-digit suffix forces a fresh label.

use crate::region::Region;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub struct NamePool {
    pub first: &'static [&'static str],
    pub last: &'static [&'static str],
}

static TAMIL: NamePool = NamePool {
    first: &[
        "Arun", "Karthik", "Vijay", "Siva", "Hari", "Prakash", "Gowtham", "Senthil",
        "Saravanan", "Madhan", "Raja", "Ajith", "Murugan", "Yuvaraj", "Dinesh", "Praveen",
        "Suriya", "Manikandan", "Naveen", "Sathish", "Ashok", "Lokesh", "Vignesh", "Santhosh",
        "Sriram", "Aravind", "Deepak", "Ganesh", "Ramesh", "Anand", "Preethi", "Swathi",
        "Kaviya", "Nandini", "Harini", "Divya", "Meenakshi", "Keerthana", "Lakshmi", "Vaishnavi",
    ],
    last: &[
        "Iyer", "Raman", "Natarajan", "Subramanian", "Krishnan", "Pillai", "Ganesan",
        "Sivakumar", "Venkatesan", "Arumugam", "Balasubramanian", "Chandrasekar", "Sundaram",
        "Rajendran", "Kandasamy", "Palanisamy", "Jayakumar", "Sankar", "Murugesan",
        "Lakshmanan", "Karthikeyan", "Thangavel", "Selvaraj", "Elangovan", "Mahadevan",
        "Ravichandran", "Gopalakrishnan", "Baskaran", "Sakthivel", "Balakrishnan",
    ],
};

static KANNADA: NamePool = NamePool {
    first: &[
        "Rakesh", "Darshan", "Manjunath", "Prajwal", "Harsha", "Keerthi", "Anitha", "Bhavana",
        "Rohith", "Chandan", "Sharath", "Rakshit", "Yogesh", "Kiran", "Nandan", "Vishal",
        "Pradeep", "Raghavendra", "Sudeep", "Srinivas", "Mahesh", "Sanjay", "Sunil",
        "Venkatesh", "Chethan", "Abhishek", "Puneeth", "Basavaraj", "Girish", "Uday",
        "Pooja", "Nandini", "Chaithra", "Aparna", "Deepa", "Meghana", "Kavya", "Shruthi",
        "Shwetha", "Pallavi",
    ],
    last: &[
        "Gowda", "Shetty", "Hegde", "Urs", "Desai", "Poojary", "Nayak", "Rao", "Pai",
        "Kamat", "Acharya", "Bhat", "Hebbar", "Kulkarni", "Hiremath", "Patil", "Angadi",
        "Kamath", "Shenoy", "Swamy", "Naik", "Nagaraj", "Gurumurthy", "Talwar", "Hosamani",
        "Bendre", "Ballal", "Kotian", "Bharadwaj", "Ranganath",
    ],
};

static TELUGU: NamePool = NamePool {
    first: &[
        "Aditya", "Ajay", "Akash", "Akhil", "Anand", "Anil", "Anirudh", "Anusha", "Aravind",
        "Arjun", "Ashok", "Avinash", "Balaji", "Bharath", "Bhargav", "Bhaskar", "Charan",
        "Chaitanya", "Deepak", "Dhanush", "Ganesh", "Gopi", "Harika", "Harini", "Hemanth",
        "Kalyan", "Karthik", "Kiran", "Kishore", "Krishna", "Lavanya", "Lokesh", "Madhavi",
        "Mahesh", "Mounika", "Nagarjuna", "Pavan", "Prasanna", "Raviteja", "Srinivas",
        "Sandeep", "Swathi", "Teja", "Vamsi", "Venkatesh", "Vijaya", "Yashwanth",
    ],
    last: &[
        "Reddy", "Rao", "Chowdary", "Naidu", "Challa", "Cherukuri", "Duggirala", "Garlapati",
        "Gudipati", "Gummadi", "Gurram", "Jonnalagadda", "Kadiyala", "Kanneganti", "Karri",
        "Kilaru", "Kothapalli", "Lanka", "Macharla", "Mandava", "Nallamothu", "Nimmagadda",
        "Pasupuleti", "Penmetsa", "Polavarapu", "Ravipati", "Sunkara", "Suryadevara",
        "Thota", "Vallabhaneni", "Vemuri", "Yarlagadda",
    ],
};

static HINDI: NamePool = NamePool {
    first: &[
        "Aakash", "Aarav", "Aarti", "Abhishek", "Aditi", "Aditya", "Ajay", "Akanksha",
        "Amit", "Anand", "Anita", "Anjali", "Ankit", "Anurag", "Arjun", "Arvind", "Ashish",
        "Deepak", "Dinesh", "Divya", "Gaurav", "Geeta", "Harish", "Himanshu", "Jyoti",
        "Kavita", "Manish", "Meera", "Mukesh", "Neha", "Nidhi", "Nikhil", "Pankaj", "Pooja",
        "Pradeep", "Priya", "Rahul", "Rajesh", "Rashmi", "Ravi", "Rohit", "Sandeep",
        "Sanjay", "Shreya", "Shweta", "Suresh", "Swati", "Vikas", "Vivek", "Yash",
    ],
    last: &[
        "Agarwal", "Ahuja", "Bajaj", "Bansal", "Bhatia", "Bhatnagar", "Chauhan", "Chopra",
        "Choudhary", "Dixit", "Dubey", "Garg", "Goel", "Goyal", "Gupta", "Jain", "Joshi",
        "Kapoor", "Khanna", "Kohli", "Kumar", "Malhotra", "Mathur", "Mehta", "Mishra",
        "Mittal", "Pandey", "Saxena", "Sharma", "Shukla", "Singh", "Sinha", "Srivastava",
        "Tiwari", "Tyagi", "Verma", "Yadav",
    ],
};

static KERALA: NamePool = NamePool {
    first: &[
        "Akhil", "Vineeth", "Anu", "Deepa", "Manu", "Sreedevi", "Arun", "Ajith", "Anjali",
        "Athira", "Aparna", "Amal", "Anand", "Arya", "Asha", "Aswin", "Abhijith", "Aleena",
        "Anagha", "Aswathy", "Devika", "Gokul", "Greeshma", "Haritha", "Jithin", "Joseph",
        "Karthika", "Kevin", "Lakshmi", "Malavika", "Meera", "Midhun", "Nikhil", "Nimisha",
        "Reshma", "Robin", "Sarath", "Sneha", "Soumya", "Vishnu",
    ],
    last: &[
        "Nair", "Menon", "Pillai", "Varma", "Kurup", "Panicker", "Warrier", "Namboothiri",
        "Kartha", "Marar", "Kaimal", "Cherian", "Chandran", "Balakrishnan", "Gopalakrishnan",
        "Narayanan", "Sankar", "Sasidharan", "Rajan", "Sukumaran", "Ramachandran", "Haridas",
        "Koshy", "Kurian", "Mathew", "Varghese", "Chacko", "Thampi", "Unnikrishnan", "Vijayan",
    ],
};

static GENERAL: NamePool = NamePool {
    first: &[
        "Aarav", "Vivaan", "Kabir", "Arjun", "Atharv", "Ishaan", "Reyansh", "Advik",
        "Vihaan", "Krish", "Ritwik", "Dev", "Harsh", "Naman", "Laksh", "Shaurya", "Kunal",
        "Yash", "Varun", "Samar", "Ayan", "Tanmay", "Parth", "Abhinav", "Pranav",
        "Siddharth", "Rohan", "Tejas", "Gautam", "Kartik", "Manav", "Neil", "Rishabh",
        "Sahil", "Sameer", "Aisha", "Anaya", "Anika", "Anjali", "Avni", "Diya", "Isha",
        "Khushi", "Kiara", "Lavanya", "Meera", "Myra", "Navya", "Nidhi", "Riya", "Saanvi",
    ],
    last: &[
        "Sharma", "Verma", "Singh", "Chauhan", "Tiwari", "Shukla", "Mishra", "Pandey",
        "Srivastava", "Saxena", "Kapoor", "Khanna", "Mehra", "Bedi", "Sethi", "Malhotra",
        "Arora", "Anand", "Grover", "Patel", "Shah", "Mehta", "Desai", "Trivedi", "Joshi",
        "Gandhi", "Bhatt", "Pathak", "Solanki", "Rao", "Iyer", "Iyengar", "Menon", "Pillai",
        "Nair", "Reddy", "Naidu", "Shetty", "Gowda",
    ],
};

/// Name pool for a region; regions without dedicated data use the general pool.
pub fn pool_for(region: Region) -> &'static NamePool {
    match region {
        Region::Tamil => &TAMIL,
        Region::Kannada => &KANNADA,
        Region::Telugu => &TELUGU,
        Region::Hindi => &HINDI,
        Region::Kerala => &KERALA,
        Region::Marathi | Region::Bengali | Region::Gujarati | Region::General => &GENERAL,
    }
}

/// Picks a `"First Last"` pair whose first name is not yet in `used_first`.
///
/// The chosen first name is recorded in `used_first`. When every first name
/// in the pool has been used, an arbitrary one gets a random two-digit
/// suffix so the label is still fresh (format inconsistency accepted).
pub fn unique_full_name<R: Rng + ?Sized>(
    used_first: &mut HashSet<String>,
    region: Region,
    rng: &mut R,
) -> String {
    let pool = pool_for(region);
    let available: Vec<&str> = pool
        .first
        .iter()
        .copied()
        .filter(|f| !used_first.contains(*f))
        .collect();

    let last = pool.last.choose(rng).copied().unwrap_or("Sharma");
    match available.choose(rng).copied() {
        Some(first) => {
            used_first.insert(first.to_string());
            format!("{} {}", first, last)
        }
        None => {
            let first = pool.first.choose(rng).copied().unwrap_or("Aarav");
            format!("{}{} {}", first, rng.gen_range(10..=99), last)
        }
    }
}

/// Flat single-pool variant used by FAQ generation: `count` first names
/// from the general pool, distinct while `count` fits in the pool, with
/// repeats allowed past that.
pub fn unique_first_names<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    let pool = GENERAL.first;
    if count <= pool.len() {
        let mut shuffled: Vec<&str> = pool.to_vec();
        shuffled.shuffle(rng);
        shuffled[..count].iter().map(|s| s.to_string()).collect()
    } else {
        (0..count)
            .map(|_| pool.choose(rng).copied().unwrap_or("Aarav").to_string())
            .collect()
    }
}
